//! Sykli CI pipeline for hcp-convert
//!
//! Run locally: sykli run
//! Or: cargo run --bin sykli --features sykli -- --emit | sykli run -

use sykli::{Condition, Pipeline, Template};

fn main() {
    let mut p = Pipeline::new();

    // === RESOURCES ===
    let src = p.dir(".");
    let cargo_registry = p.cache("cargo-registry");
    let cargo_git = p.cache("cargo-git");
    let target_cache = p.cache("target");

    // === TEMPLATE ===
    let rust = Template::new()
        .container("rust:1.85")
        .mount_dir(&src, "/src")
        .mount_cache(&cargo_registry, "/usr/local/cargo/registry")
        .mount_cache(&cargo_git, "/usr/local/cargo/git")
        .mount_cache(&target_cache, "/src/target")
        .workdir("/src");

    // === TASKS ===

    let _ = p
        .task("test")
        .from(&rust)
        .run("cargo test --all-features")
        .inputs(&["**/*.rs", "Cargo.toml", "Cargo.lock"]);

    let _ = p
        .task("lint")
        .from(&rust)
        .run("cargo clippy --all-targets --all-features -- -D warnings")
        .inputs(&["**/*.rs", "Cargo.toml", "Cargo.lock"]);

    let _ = p
        .task("fmt")
        .from(&rust)
        .run("cargo fmt -- --check")
        .inputs(&["**/*.rs"]);

    let _ = p
        .task("build")
        .from(&rust)
        .run("cargo build --release --bin hcp-convert")
        .inputs(&["**/*.rs", "Cargo.toml", "Cargo.lock"])
        .output("binary", "target/release/hcp-convert")
        .after(&["test", "lint", "fmt"]);

    let _ = p
        .task("schema")
        .from(&rust)
        .run("cargo run --bin gen-schema > /tmp/schema.json")
        .inputs(&["src/versions/**/*.rs"])
        .after(&["build"]);

    // Smoke test the binary against its own endpoints on push
    let _ = p
        .task("smoke-test")
        .from(&rust)
        .run(
            r#"#!/bin/bash
set -e

HCP_PORT=18080 RUST_LOG=info ./target/release/hcp-convert 2>&1 | tee /tmp/hcp-convert.log &
PID=$!
sleep 2

curl -sf http://127.0.0.1:18080/healthz
curl -sf http://127.0.0.1:18080/readyz

BODY='{"request":{"uid":"smoke","kind":"nodePool","sourceApiVersion":"2024-06-10-preview","desiredApiVersion":"2025-12-23-preview","objects":[{"properties":{"replicas":1}}]}}'
STATUS=$(curl -sf -H 'Content-Type: application/json' -d "$BODY" http://127.0.0.1:18080/convert | grep -o '"status":"[A-Za-z]*"')
if [ "$STATUS" != '"status":"Success"' ]; then
  echo "ERROR: conversion failed: $STATUS"
  cat /tmp/hcp-convert.log
  exit 1
fi

kill $PID || true
"#,
        )
        .input_from("build", "binary", "/src/target/release/hcp-convert")
        .when_cond(Condition::event("push").or(Condition::negate(Condition::branch("*"))))
        .timeout(300);

    p.emit();
}
