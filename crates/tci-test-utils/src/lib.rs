//! Testing utilities for the TCI workspace
//!
//! Shared service-module fixtures and filesystem helpers.

#![allow(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};
use tci_source::{Language, SyntaxDocument};
use tempfile::TempDir;

/// Service directory relative to a project root
pub const SERVICES_DIR: &str = "src/services";

/// Service with one create and one update path, no tenant fields yet
pub const AREAS_SERVICE: &str = r#"import { db } from "@/db";
import type { Area } from "@/types";

export async function createArea(areaName: string): Promise<Area> {
  const newArea: Area = {
    meta: {
      id: crypto.randomUUID(),
      name: areaName,
      createdAt: new Date().toISOString(),
    },
  };
  await db.areas.put(newArea);
  return newArea;
}

export async function updateArea(id: string, areaName: string): Promise<Area> {
  const existing = await db.areas.get(id);
  const updatedArea: Area = {
    ...existing,
    meta: {
      id: existing.meta.id,
      name: areaName,
      updatedAt: new Date().toISOString(),
    },
  };
  await db.areas.put(updatedArea);
  return updatedArea;
}
"#;

/// Service whose entity literal already carries tenant fields
pub const HOUSING_ROOMS_SERVICE: &str = r#"import { db } from "@/db";
import { getTenantContext } from "@/utils/tenantContext";

export async function createHousingRoom(name: string) {
  const { tenantId, campId } = getTenantContext();
  const newHousingRoom = {
    meta: {
      id: crypto.randomUUID(),
      tenantId,
      campId,
      name,
    },
  };
  await db.housingRooms.put(newHousingRoom);
  return newHousingRoom;
}
"#;

/// Module without any entity literal
pub const PLAIN_MODULE: &str = r#"export const formatName = (first: string, last: string) => {
  const parts = { first, last };
  return `${parts.first} ${parts.last}`;
};
"#;

/// Single `const <binding> = { meta: { id: crypto.randomUUID(), ... } };`
///
/// `fields` are `(name, expression)` pairs placed after the identifier.
pub fn entity_literal(binding: &str, fields: &[(&str, &str)]) -> String {
    let mut out = format!("const {binding} = {{\n  meta: {{\n    id: crypto.randomUUID(),\n");
    for (name, value) in fields {
        out.push_str(&format!("    {name}: {value},\n"));
    }
    out.push_str("  },\n};\n");
    out
}

/// Temp project root with `files` written under `src/services`
pub fn service_dir(files: &[(&str, &[u8])]) -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let services = root.path().join(SERVICES_DIR);
    fs::create_dir_all(&services).unwrap();
    for (name, content) in files {
        fs::write(services.join(name), content).unwrap();
    }
    root
}

/// Path of a service file inside a [`service_dir`] root
pub fn service_path(root: &Path, name: &str) -> PathBuf {
    root.join(SERVICES_DIR).join(name)
}

/// Parse TypeScript, panicking on parser failure
pub fn parse_ts(source: &str) -> SyntaxDocument {
    SyntaxDocument::parse_str(source, Language::TypeScript).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_parse_cleanly() {
        for fixture in [AREAS_SERVICE, HOUSING_ROOMS_SERVICE, PLAIN_MODULE] {
            assert_eq!(parse_ts(fixture).error_count(), 0);
        }
        assert_eq!(parse_ts(&entity_literal("newArea", &[("name", "areaName")])).error_count(), 0);
    }

    #[test]
    fn service_dir_layout() {
        let root = service_dir(&[("areasService.ts", AREAS_SERVICE.as_bytes())]);
        let path = service_path(root.path(), "areasService.ts");
        assert_eq!(fs::read_to_string(path).unwrap(), AREAS_SERVICE);
    }
}
