use hcp_convert::versions::{v20240610preview, v20251223preview, ApiVersion};
use schemars::schema_for;
use serde_json::{json, Map, Value};

fn main() -> anyhow::Result<()> {
    // JSON Schema of every resource in every API version, keyed by version
    // then kind. Use: cargo run --bin gen-schema > schema.json
    let mut versions = Map::new();

    for version in ApiVersion::ALL {
        let schemas = match version {
            ApiVersion::V20240610Preview => json!({
                "cluster": schema_for!(v20240610preview::HcpOpenShiftCluster),
                "nodePool": schema_for!(v20240610preview::HcpOpenShiftClusterNodePool),
                "externalAuth": schema_for!(v20240610preview::HcpOpenShiftClusterExternalAuth),
            }),
            ApiVersion::V20251223Preview => json!({
                "cluster": schema_for!(v20251223preview::HcpOpenShiftCluster),
                "nodePool": schema_for!(v20251223preview::HcpOpenShiftClusterNodePool),
                "externalAuth": schema_for!(v20251223preview::HcpOpenShiftClusterExternalAuth),
            }),
        };
        versions.insert(version.as_str().to_string(), schemas);
    }

    println!("{}", serde_json::to_string_pretty(&Value::Object(versions))?);
    Ok(())
}
