// Re-export the proto module from the shared `api-shared` crate so callers
// can reference `api_grpc::pb`.
pub use api_shared::pb;

use api_shared::pb::catalog_server::Catalog;
use api_shared::{status_from_error, ApiKeyValidator, CatalogService, HealthService};
use tonic::{Request, Response, Status};

/// Build the authentication interceptor for gRPC requests.
///
/// Every request must carry an `x-api-key` metadata value matching the configured key.
pub fn auth_interceptor(
    validator: ApiKeyValidator,
) -> impl FnMut(Request<()>) -> Result<Request<()>, Status> + Clone + Send + Sync + 'static {
    move |req: Request<()>| {
        let api_key = req
            .metadata()
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| Status::unauthenticated("Missing x-api-key header"))?;

        validator.validate(api_key)?;
        Ok(req)
    }
}

/// Empty strings in optional request fields mean "not supplied".
fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[derive(Clone)]
pub struct CatalogGrpcService {
    catalog: CatalogService,
}

impl CatalogGrpcService {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }
}

#[tonic::async_trait]
impl Catalog for CatalogGrpcService {
    async fn health(&self, _req: Request<pb::HealthReq>) -> Result<Response<pb::HealthRes>, Status> {
        Ok(Response::new(HealthService::check_health()))
    }

    async fn get_entry(&self, req: Request<pb::GetEntryReq>) -> Result<Response<pb::Entry>, Status> {
        let req = req.into_inner();
        self.catalog
            .get_entry(&req.specialty, &req.id)
            .map(Response::new)
            .map_err(status_from_error)
    }

    async fn search_entries(
        &self,
        req: Request<pb::SearchEntriesReq>,
    ) -> Result<Response<pb::EntryList>, Status> {
        let req = req.into_inner();
        self.catalog
            .list_entries(
                &req.specialty,
                non_empty(&req.category),
                non_empty(&req.query),
            )
            .map(Response::new)
            .map_err(status_from_error)
    }

    async fn list_by_category(
        &self,
        req: Request<pb::ListByCategoryReq>,
    ) -> Result<Response<pb::EntryList>, Status> {
        let req = req.into_inner();
        // The category is required here, so "" is passed through and rejected as invalid.
        self.catalog
            .list_entries(&req.specialty, Some(&req.category), None)
            .map(Response::new)
            .map_err(status_from_error)
    }

    async fn count_entries(
        &self,
        req: Request<pb::CountEntriesReq>,
    ) -> Result<Response<pb::CountRes>, Status> {
        let req = req.into_inner();
        self.catalog
            .count_entries(&req.specialty)
            .map(Response::new)
            .map_err(status_from_error)
    }

    async fn get_topic(&self, req: Request<pb::GetTopicReq>) -> Result<Response<pb::Topic>, Status> {
        let req = req.into_inner();
        self.catalog
            .get_topic(&req.id)
            .map(Response::new)
            .map_err(status_from_error)
    }

    async fn search_topics(
        &self,
        req: Request<pb::SearchTopicsReq>,
    ) -> Result<Response<pb::TopicList>, Status> {
        let req = req.into_inner();
        self.catalog
            .list_topics(non_empty(&req.content_type), non_empty(&req.query))
            .map(Response::new)
            .map_err(status_from_error)
    }

    async fn get_topic_level(
        &self,
        req: Request<pb::GetTopicLevelReq>,
    ) -> Result<Response<pb::Level>, Status> {
        let req = req.into_inner();
        self.catalog
            .topic_level(&req.id, req.level)
            .map(Response::new)
            .map_err(status_from_error)
    }

    async fn list_cross_references(
        &self,
        req: Request<pb::ListCrossReferencesReq>,
    ) -> Result<Response<pb::CrossReferenceList>, Status> {
        let req = req.into_inner();
        self.catalog
            .cross_references(&req.id)
            .map(Response::new)
            .map_err(status_from_error)
    }
}
