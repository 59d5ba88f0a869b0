//! Canonical resource model and the request-handling primitives shared by
//! every API version

pub mod admin_credential;
pub mod arm;
pub mod cloud_error;
pub mod cluster;
pub mod enums;
pub mod error;
pub mod external_auth;
pub mod field;
pub mod node_pool;
pub mod optional;
pub mod request;
pub mod resource_id;
pub mod validation;
pub mod version;
pub mod visibility;

pub use admin_credential::HcpOpenShiftClusterAdminCredential;
pub use cloud_error::{CloudError, CloudErrorBody};
pub use cluster::HcpOpenShiftCluster;
pub use error::ConversionError;
pub use external_auth::HcpOpenShiftClusterExternalAuth;
pub use field::{FieldError, FieldErrors};
pub use node_pool::HcpOpenShiftClusterNodePool;
pub use request::{apply_request_body, decode_request, CanonicalResource};
pub use resource_id::{ResourceId, ResourceType};
pub use version::HcpOpenShiftVersion;
