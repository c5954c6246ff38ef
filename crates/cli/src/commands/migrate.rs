// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cb migrate` - bring the schema up to date

use anyhow::Result;
use cb_storage::MigrationRegistry;
use serde::Serialize;
use sqlx::PgPool;

use crate::output::{self, OutputFormat};

#[derive(Serialize)]
struct MigrateReport {
    applied: usize,
    version: u32,
}

pub async fn handle(pool: &PgPool, format: OutputFormat) -> Result<()> {
    let registry = MigrationRegistry::new();
    let report = MigrateReport {
        applied: registry.apply(pool).await?,
        version: registry.latest(),
    };
    output::print(format, &report, |_| {
        if report.applied == 0 {
            println!("Schema already at v{}", report.version);
        } else {
            println!("Applied {} migration(s), schema now at v{}", report.applied, report.version);
        }
    })
}
