//! Embeds the public Supabase settings of the build environment so release
//! binaries start against the right project without a `.env` next to them.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

/// Environment variable and the key it is written under
const EMBEDDED: [(&str, &str); 5] = [
    ("SUPABASE_URL", "supabase_url"),
    ("SUPABASE_ANON_KEY", "supabase_anon_key"),
    ("FOLIO_STORAGE_BUCKET", "storage_bucket"),
    ("FOLIO_STORAGE_FOLDER", "storage_folder"),
    ("FOLIO_PROJECTS_TABLE", "projects_table"),
];

fn main() {
    for (var, _) in EMBEDDED {
        println!("cargo:rerun-if-env-changed={var}");
    }

    let manifest_dir =
        env::var_os("CARGO_MANIFEST_DIR").map_or_else(|| PathBuf::from("."), PathBuf::from);
    let dotenv = manifest_dir.join("../../.env");
    if dotenv.is_file() {
        println!("cargo:rerun-if-changed={}", dotenv.display());
        let _ = dotenvy::from_path(&dotenv);
    }

    let result = env::var_os("OUT_DIR")
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set"))
        .and_then(|out_dir| write_settings(Path::new(&out_dir)));
    if let Err(error) = result {
        println!("cargo:warning=could not embed desktop settings: {error}");
    }
}

fn write_settings(out_dir: &Path) -> io::Result<()> {
    let settings: Map<String, Value> = EMBEDDED
        .iter()
        .map(|(var, key)| {
            let value = env::var(var)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map_or(Value::Null, Value::String);
            ((*key).to_string(), value)
        })
        .collect();

    let json = serde_json::to_string_pretty(&Value::Object(settings)).map_err(io::Error::other)?;
    fs::create_dir_all(out_dir)?;
    fs::write(out_dir.join("desktop-bootstrap.json"), json)
}
