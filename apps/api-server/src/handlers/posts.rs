//! Post handlers - the HTTP boundary over the post catalog.
//!
//! Request validation (lengths, pagination bounds) and role gating for the
//! admin-only routes live here; everything behind them is the catalog's job.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::catalog::{CreatePost, PostPatch};
use quill_core::domain::Post;
use quill_core::pagination::{Page, PageMeta, PageRequest};
use quill_shared::dto::{
    CreatePostRequest, Paginated, PaginationMeta, PaginationQuery, PostResponse,
    UpdatePostRequest,
};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const MAX_PAGE_LIMIT: u64 = 100;
const MIN_TITLE_LEN: usize = 3;
const MIN_CONTENT_LEN: usize = 10;

/// GET /api/posts - published posts, public, paginated.
pub async fn list_published(
    state: web::Data<AppState>,
    query: web::Query<PaginationQuery>,
) -> AppResult<HttpResponse> {
    let page = page_request(&query)?;
    let result = state.catalog.list_published(page).await?;

    Ok(HttpResponse::Ok().json(paginated(result)))
}

/// GET /api/posts/admin/all - every post in every status. Admin only.
pub async fn list_for_admin(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<PaginationQuery>,
) -> AppResult<HttpResponse> {
    if !identity.is_admin() {
        return Err(AppError::Forbidden);
    }

    let page = page_request(&query)?;
    let result = state.catalog.list_for_admin(page).await?;

    Ok(HttpResponse::Ok().json(paginated(result)))
}

/// GET /api/posts/my - the caller's posts in every status.
pub async fn list_mine(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<PaginationQuery>,
) -> AppResult<HttpResponse> {
    let page = page_request(&query)?;
    let result = state.catalog.list_mine(identity.user_id, page).await?;

    Ok(HttpResponse::Ok().json(paginated(result)))
}

/// GET /api/posts/{id} - visibility depends on the (optional) caller.
pub async fn get_by_id(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let post = state
        .catalog
        .get_by_id(path.into_inner(), &identity.caller())
        .await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// GET /api/posts/slug/{slug}
pub async fn get_by_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let post = state
        .catalog
        .get_by_slug(&path.into_inner(), &identity.caller())
        .await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /api/posts - create a draft owned by the caller.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.title.chars().count() < MIN_TITLE_LEN {
        return Err(AppError::BadRequest(format!(
            "Title must be at least {MIN_TITLE_LEN} characters"
        )));
    }
    if req.content.chars().count() < MIN_CONTENT_LEN {
        return Err(AppError::BadRequest(format!(
            "Content must be at least {MIN_CONTENT_LEN} characters"
        )));
    }

    let input = CreatePost {
        title: req.title,
        content: req.content,
        slug: req.slug,
        excerpt: req.excerpt,
    };

    let post = state.catalog.create(input, identity.user_id).await?;

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// PATCH /api/posts/{id} - partial update. Owner or admin.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if let Some(title) = &req.title {
        if title.chars().count() < MIN_TITLE_LEN {
            return Err(AppError::BadRequest(format!(
                "Title must be at least {MIN_TITLE_LEN} characters"
            )));
        }
    }
    if let Some(content) = &req.content {
        if content.chars().count() < MIN_CONTENT_LEN {
            return Err(AppError::BadRequest(format!(
                "Content must be at least {MIN_CONTENT_LEN} characters"
            )));
        }
    }

    let patch = PostPatch {
        title: req.title,
        content: req.content,
        slug: req.slug,
        excerpt: req.excerpt,
    };

    let post = state
        .catalog
        .update(path.into_inner(), patch, &identity.caller())
        .await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PATCH /api/posts/{id}/publish - make publicly visible now. Owner or admin.
pub async fn publish(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let post = state
        .catalog
        .publish(path.into_inner(), &identity.caller())
        .await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PATCH /api/posts/{id}/archive - owner or admin.
pub async fn archive(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let post = state
        .catalog
        .archive(path.into_inner(), &identity.caller())
        .await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/posts/{id} - hard delete. Admin only.
pub async fn remove(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    if !identity.is_admin() {
        return Err(AppError::Forbidden);
    }

    state.catalog.remove(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

fn page_request(query: &PaginationQuery) -> Result<PageRequest, AppError> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    if page < 1 {
        return Err(AppError::BadRequest("page must be at least 1".to_string()));
    }
    if limit < 1 || limit > MAX_PAGE_LIMIT {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {MAX_PAGE_LIMIT}"
        )));
    }

    Ok(PageRequest::new(page, limit))
}

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        slug: post.slug,
        excerpt: post.excerpt,
        status: post.status.as_str().to_string(),
        published_at: post.published_at,
        author_id: post.author_id,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn to_meta(meta: PageMeta) -> PaginationMeta {
    PaginationMeta {
        page: meta.page,
        limit: meta.limit,
        total_items: meta.total_items,
        total_pages: meta.total_pages,
        has_next_page: meta.has_next_page,
        has_previous_page: meta.has_previous_page,
    }
}

fn paginated(page: Page<Post>) -> Paginated<PostResponse> {
    Paginated {
        data: page.items.into_iter().map(to_response).collect(),
        meta: to_meta(page.meta),
    }
}
