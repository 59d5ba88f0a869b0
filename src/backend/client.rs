//! Typed client for the cluster-management backend
//!
//! Follows a trait-based pattern:
//! - `BackendClient` trait for abstraction
//! - `HttpBackendClient` for production (reqwest against the backend API)
//!
//! Reads of clusters and node pools resolve link objects the backend
//! returns in place of nested resources, so callers always see them inline.

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::error::BackendError;
use super::internal_id::{InternalId, InternalIdKind, ARO_HCP_PREFIX};
use super::iterator::{ListIterator, Page, PageFetcher};
use super::model::{
    BreakGlassCredential, Cluster, ClusterAutoscaler, ExternalAuth, Link, ListPage, NodePool,
    Version,
};

/// Items requested per list page
pub const PAGE_SIZE: u32 = 100;

/// Operations against the cluster-management backend
#[async_trait]
pub trait BackendClient: Send + Sync {
    async fn get_cluster(&self, id: &InternalId) -> Result<Cluster, BackendError>;

    /// Create a cluster together with its autoscaler
    async fn post_cluster(
        &self,
        cluster: Cluster,
        autoscaler: ClusterAutoscaler,
    ) -> Result<Cluster, BackendError>;

    async fn update_cluster(&self, id: &InternalId, cluster: Cluster) -> Result<Cluster, BackendError>;

    async fn delete_cluster(&self, id: &InternalId) -> Result<(), BackendError>;

    fn list_clusters(&self, search: Option<&str>) -> ListIterator<Cluster>;

    async fn get_cluster_autoscaler(&self, id: &InternalId) -> Result<ClusterAutoscaler, BackendError>;

    async fn update_cluster_autoscaler(
        &self,
        id: &InternalId,
        autoscaler: ClusterAutoscaler,
    ) -> Result<ClusterAutoscaler, BackendError>;

    async fn get_node_pool(&self, id: &InternalId) -> Result<NodePool, BackendError>;

    async fn post_node_pool(
        &self,
        cluster_id: &InternalId,
        node_pool: NodePool,
    ) -> Result<NodePool, BackendError>;

    async fn update_node_pool(&self, id: &InternalId, node_pool: NodePool) -> Result<NodePool, BackendError>;

    async fn delete_node_pool(&self, id: &InternalId) -> Result<(), BackendError>;

    fn list_node_pools(&self, cluster_id: &InternalId, search: Option<&str>) -> ListIterator<NodePool>;

    async fn get_external_auth(&self, id: &InternalId) -> Result<ExternalAuth, BackendError>;

    async fn post_external_auth(
        &self,
        cluster_id: &InternalId,
        external_auth: ExternalAuth,
    ) -> Result<ExternalAuth, BackendError>;

    async fn update_external_auth(
        &self,
        id: &InternalId,
        external_auth: ExternalAuth,
    ) -> Result<ExternalAuth, BackendError>;

    async fn delete_external_auth(&self, id: &InternalId) -> Result<(), BackendError>;

    fn list_external_auths(
        &self,
        cluster_id: &InternalId,
        search: Option<&str>,
    ) -> ListIterator<ExternalAuth>;

    async fn get_break_glass_credential(
        &self,
        id: &InternalId,
    ) -> Result<BreakGlassCredential, BackendError>;

    async fn post_break_glass_credential(
        &self,
        cluster_id: &InternalId,
    ) -> Result<BreakGlassCredential, BackendError>;

    /// Revoke every break-glass credential of a cluster
    async fn revoke_break_glass_credentials(&self, cluster_id: &InternalId) -> Result<(), BackendError>;

    fn list_break_glass_credentials(
        &self,
        cluster_id: &InternalId,
        search: Option<&str>,
    ) -> ListIterator<BreakGlassCredential>;

    async fn get_version(&self, name: &str) -> Result<Version, BackendError>;

    fn list_versions(&self) -> ListIterator<Version>;
}

/// Backend client over HTTP
#[derive(Clone)]
pub struct HttpBackendClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackendClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        debug!(method = %method, path = %path, "Backend request");
        let builder = self.client.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and read the body, turning error statuses into
    /// `BackendError::Api`
    async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<Vec<u8>, BackendError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        if !status.is_success() {
            return Err(BackendError::from_response(status.as_u16(), &body));
        }
        Ok(body)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, what: &'static str) -> Result<T, BackendError> {
        let body = self.execute(self.request(Method::GET, path)).await?;
        decode(&body, what)
    }

    async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        what: &'static str,
    ) -> Result<T, BackendError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let body = self.execute(self.request(method, path).json(body)).await?;
        decode(&body, what)
    }

    async fn delete(&self, path: &str) -> Result<(), BackendError> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    fn list<T>(&self, path: String, search: Option<&str>) -> ListIterator<T>
    where
        T: DeserializeOwned + ResolveLinks + Send + 'static,
    {
        ListIterator::new(HttpPageFetcher {
            client: self.clone(),
            path,
            search: search.map(str::to_string),
        })
    }

    async fn resolve_cluster(&self, mut cluster: Cluster) -> Result<Cluster, BackendError> {
        if let Some(href) = cluster.autoscaler.as_ref().and_then(Link::href) {
            debug!(href = %href, "Resolving cluster autoscaler link");
            let autoscaler: ClusterAutoscaler = self.get(href, "autoscaler").await?;
            cluster.autoscaler = Some(Link::Inline(autoscaler));
        }
        Ok(cluster)
    }

    async fn resolve_node_pool(&self, mut node_pool: NodePool) -> Result<NodePool, BackendError> {
        if let Some(href) = node_pool.version.as_ref().and_then(Link::href) {
            debug!(href = %href, "Resolving node pool version link");
            let version: Version = self.get(href, "version").await?;
            node_pool.version = Some(Link::Inline(version));
        }
        Ok(node_pool)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8], what: &'static str) -> Result<T, BackendError> {
    if body.is_empty() {
        return Err(BackendError::EmptyBody(what));
    }
    Ok(serde_json::from_slice(body)?)
}

fn clusters_path() -> String {
    format!("{}/clusters", ARO_HCP_PREFIX)
}

fn autoscaler_path(cluster_id: &InternalId) -> String {
    format!("{}/autoscaler", cluster_id.cluster_path())
}

fn external_auths_path(cluster_id: &InternalId) -> String {
    format!("{}/external_auths", cluster_id.cluster_path())
}

fn node_pools_path(cluster_id: &InternalId) -> String {
    format!("{}/node_pools", cluster_id.cluster_path())
}

fn break_glass_credentials_path(cluster_id: &InternalId) -> String {
    format!("{}/break_glass_credentials", cluster_id.legacy_cluster_path())
}

fn versions_path() -> String {
    format!("{}/versions", ARO_HCP_PREFIX)
}

/// Backend objects that may carry links to be resolved after a read
#[async_trait]
trait ResolveLinks: Sized + Send {
    async fn resolve_links(self, _client: &HttpBackendClient) -> Result<Self, BackendError> {
        Ok(self)
    }
}

#[async_trait]
impl ResolveLinks for Cluster {
    async fn resolve_links(self, client: &HttpBackendClient) -> Result<Self, BackendError> {
        client.resolve_cluster(self).await
    }
}

#[async_trait]
impl ResolveLinks for NodePool {
    async fn resolve_links(self, client: &HttpBackendClient) -> Result<Self, BackendError> {
        client.resolve_node_pool(self).await
    }
}

impl ResolveLinks for ExternalAuth {}
impl ResolveLinks for BreakGlassCredential {}
impl ResolveLinks for Version {}

/// Pages through a backend collection with `page`, `size` and `search`
struct HttpPageFetcher {
    client: HttpBackendClient,
    path: String,
    search: Option<String>,
}

#[async_trait]
impl<T> PageFetcher<T> for HttpPageFetcher
where
    T: DeserializeOwned + ResolveLinks + Send + 'static,
{
    async fn fetch(&self, page: u32) -> Result<Page<T>, BackendError> {
        let mut query = vec![("page", page.to_string()), ("size", PAGE_SIZE.to_string())];
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        let builder = self.client.request(Method::GET, &self.path).query(&query);
        let body = self.client.execute(builder).await?;
        let list: ListPage<T> = decode(&body, "list")?;
        Ok(Page {
            total: list.total,
            items: list.items,
        })
    }

    async fn resolve(&self, item: T) -> Result<T, BackendError> {
        item.resolve_links(&self.client).await
    }
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    async fn get_cluster(&self, id: &InternalId) -> Result<Cluster, BackendError> {
        id.expect_kind(InternalIdKind::Cluster)?;
        let cluster = self.get(&id.cluster_path(), "cluster").await?;
        self.resolve_cluster(cluster).await
    }

    async fn post_cluster(
        &self,
        mut cluster: Cluster,
        autoscaler: ClusterAutoscaler,
    ) -> Result<Cluster, BackendError> {
        cluster.autoscaler = Some(Link::Inline(autoscaler));
        let created = self
            .send(Method::POST, &clusters_path(), &cluster, "cluster")
            .await?;
        self.resolve_cluster(created).await
    }

    async fn update_cluster(&self, id: &InternalId, cluster: Cluster) -> Result<Cluster, BackendError> {
        id.expect_kind(InternalIdKind::Cluster)?;
        let updated = self
            .send(Method::PATCH, &id.cluster_path(), &cluster, "cluster")
            .await?;
        self.resolve_cluster(updated).await
    }

    async fn delete_cluster(&self, id: &InternalId) -> Result<(), BackendError> {
        id.expect_kind(InternalIdKind::Cluster)?;
        self.delete(&id.cluster_path()).await
    }

    fn list_clusters(&self, search: Option<&str>) -> ListIterator<Cluster> {
        self.list(clusters_path(), search)
    }

    async fn get_cluster_autoscaler(&self, id: &InternalId) -> Result<ClusterAutoscaler, BackendError> {
        id.expect_kind(InternalIdKind::Cluster)?;
        self.get(&autoscaler_path(id), "autoscaler").await
    }

    async fn update_cluster_autoscaler(
        &self,
        id: &InternalId,
        autoscaler: ClusterAutoscaler,
    ) -> Result<ClusterAutoscaler, BackendError> {
        id.expect_kind(InternalIdKind::Cluster)?;
        self.send(Method::PATCH, &autoscaler_path(id), &autoscaler, "autoscaler")
            .await
    }

    async fn get_node_pool(&self, id: &InternalId) -> Result<NodePool, BackendError> {
        id.expect_kind(InternalIdKind::NodePool)?;
        let path = format!("{}/{}", node_pools_path(id), id.id());
        let node_pool = self.get(&path, "node pool").await?;
        self.resolve_node_pool(node_pool).await
    }

    async fn post_node_pool(
        &self,
        cluster_id: &InternalId,
        node_pool: NodePool,
    ) -> Result<NodePool, BackendError> {
        cluster_id.expect_kind(InternalIdKind::Cluster)?;
        let created = self
            .send(Method::POST, &node_pools_path(cluster_id), &node_pool, "node pool")
            .await?;
        self.resolve_node_pool(created).await
    }

    async fn update_node_pool(&self, id: &InternalId, node_pool: NodePool) -> Result<NodePool, BackendError> {
        id.expect_kind(InternalIdKind::NodePool)?;
        let path = format!("{}/{}", node_pools_path(id), id.id());
        let updated = self
            .send(Method::PATCH, &path, &node_pool, "node pool")
            .await?;
        self.resolve_node_pool(updated).await
    }

    async fn delete_node_pool(&self, id: &InternalId) -> Result<(), BackendError> {
        id.expect_kind(InternalIdKind::NodePool)?;
        self.delete(&format!("{}/{}", node_pools_path(id), id.id())).await
    }

    fn list_node_pools(&self, cluster_id: &InternalId, search: Option<&str>) -> ListIterator<NodePool> {
        if let Err(e) = cluster_id.expect_kind(InternalIdKind::Cluster) {
            return ListIterator::from_items(Vec::new(), Some(e));
        }
        self.list(node_pools_path(cluster_id), search)
    }

    async fn get_external_auth(&self, id: &InternalId) -> Result<ExternalAuth, BackendError> {
        id.expect_kind(InternalIdKind::ExternalAuth)?;
        self.get(id.path(), "external auth").await
    }

    async fn post_external_auth(
        &self,
        cluster_id: &InternalId,
        external_auth: ExternalAuth,
    ) -> Result<ExternalAuth, BackendError> {
        cluster_id.expect_kind(InternalIdKind::Cluster)?;
        self.send(
            Method::POST,
            &external_auths_path(cluster_id),
            &external_auth,
            "external auth",
        )
        .await
    }

    async fn update_external_auth(
        &self,
        id: &InternalId,
        external_auth: ExternalAuth,
    ) -> Result<ExternalAuth, BackendError> {
        id.expect_kind(InternalIdKind::ExternalAuth)?;
        self.send(Method::PATCH, id.path(), &external_auth, "external auth")
            .await
    }

    async fn delete_external_auth(&self, id: &InternalId) -> Result<(), BackendError> {
        id.expect_kind(InternalIdKind::ExternalAuth)?;
        self.delete(id.path()).await
    }

    fn list_external_auths(
        &self,
        cluster_id: &InternalId,
        search: Option<&str>,
    ) -> ListIterator<ExternalAuth> {
        if let Err(e) = cluster_id.expect_kind(InternalIdKind::Cluster) {
            return ListIterator::from_items(Vec::new(), Some(e));
        }
        self.list(external_auths_path(cluster_id), search)
    }

    async fn get_break_glass_credential(
        &self,
        id: &InternalId,
    ) -> Result<BreakGlassCredential, BackendError> {
        id.expect_kind(InternalIdKind::BreakGlassCredential)?;
        self.get(id.path(), "break glass credential").await
    }

    async fn post_break_glass_credential(
        &self,
        cluster_id: &InternalId,
    ) -> Result<BreakGlassCredential, BackendError> {
        cluster_id.expect_kind(InternalIdKind::Cluster)?;
        self.send(
            Method::POST,
            &break_glass_credentials_path(cluster_id),
            &BreakGlassCredential::default(),
            "break glass credential",
        )
        .await
    }

    async fn revoke_break_glass_credentials(&self, cluster_id: &InternalId) -> Result<(), BackendError> {
        cluster_id.expect_kind(InternalIdKind::Cluster)?;
        self.delete(&break_glass_credentials_path(cluster_id)).await
    }

    fn list_break_glass_credentials(
        &self,
        cluster_id: &InternalId,
        search: Option<&str>,
    ) -> ListIterator<BreakGlassCredential> {
        if let Err(e) = cluster_id.expect_kind(InternalIdKind::Cluster) {
            return ListIterator::from_items(Vec::new(), Some(e));
        }
        self.list(break_glass_credentials_path(cluster_id), search)
    }

    async fn get_version(&self, name: &str) -> Result<Version, BackendError> {
        self.get(&format!("{}/{}", versions_path(), name), "version")
            .await
    }

    fn list_versions(&self) -> ListIterator<Version> {
        self.list(versions_path(), None)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
