use actix_web::{HttpResponse, Responder, web};

use crate::cache::{ListingCache, keys};
use crate::listing::derive_page;
use crate::models::ApiResponse;
use crate::models::workers::WorkerListQuery;
use crate::store::WorkerStore;

/// GET /api/workers — the whole fixture, or a filtered, sorted page when any
/// of `page`, `pageSize`, `service`, `minPrice`, `maxPrice`, `q` is given.
pub async fn get_workers(
    store: web::Data<WorkerStore>,
    cache: web::Data<ListingCache>,
    query: web::Query<WorkerListQuery>,
) -> impl Responder {
    let query = query.into_inner();

    if !query.has_listing_params() {
        let records = store.records();
        return HttpResponse::Ok().json(
            ApiResponse::ok(records)
                .with_metadata(serde_json::json!({ "count": records.len() })),
        );
    }

    let worker_query = query.to_worker_query();
    let cache_key = keys::worker_list(&worker_query);

    if let Some(cached) = cache.get(&cache_key).await {
        tracing::debug!(key = %cache_key, "Listing cache hit");
        return HttpResponse::Ok().json(cached);
    }

    let filters = worker_query.filters.clone().unwrap_or_default();
    let page = derive_page(
        store.records(),
        &filters,
        worker_query.page,
        worker_query.page_size,
    );

    let metadata = serde_json::json!({
        "page": page.page,
        "pageSize": page.page_size,
        "totalPages": page.total_pages,
        "totalCount": page.total_count,
    });

    match serde_json::to_value(ApiResponse::ok(page.items).with_metadata(metadata)) {
        Ok(body) => {
            cache.insert(cache_key, body.clone()).await;
            HttpResponse::Ok().json(body)
        }
        Err(e) => {
            tracing::error!("Failed to serialize worker page: {e}");
            HttpResponse::InternalServerError().json(ApiResponse::failure("Failed to load workers"))
        }
    }
}

/// GET /api/workers/{id} — a single worker for the detail view.
pub async fn get_worker(store: web::Data<WorkerStore>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    match store.get_worker_by_id(id) {
        Some(worker) => HttpResponse::Ok().json(ApiResponse::ok(worker)),
        None => HttpResponse::NotFound().json(ApiResponse::failure(format!("Worker {id} not found"))),
    }
}
