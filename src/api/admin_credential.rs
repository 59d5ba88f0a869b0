use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Temporary cluster-admin access to a cluster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HcpOpenShiftClusterAdminCredential {
    pub expiration_timestamp: Option<DateTime<Utc>>,
    pub kubeconfig: String,
}
