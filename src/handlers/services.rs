use actix_web::{HttpResponse, Responder, web};

use crate::listing::{list_services, service_stats};
use crate::models::ApiResponse;
use crate::models::services::ServicesQuery;
use crate::store::WorkerStore;

/// GET /api/services — distinct service names, or per-service statistics
/// with `?stats=true`.
pub async fn get_services(
    store: web::Data<WorkerStore>,
    query: web::Query<ServicesQuery>,
) -> impl Responder {
    let records = store.records();

    if query.wants_stats() {
        let stats = service_stats(records);
        let total_workers: u64 = stats.iter().map(|s| s.count).sum();
        let metadata = serde_json::json!({
            "totalServices": stats.len(),
            "totalWorkers": total_workers,
        });
        return HttpResponse::Ok().json(ApiResponse::ok(stats).with_metadata(metadata));
    }

    let services = list_services(records);
    let metadata = serde_json::json!({ "count": services.len() });
    HttpResponse::Ok().json(ApiResponse::ok(services).with_metadata(metadata))
}
