//! Schema file location
//!
//! Lookup order, first hit wins:
//! 1. The cached hint from the last successful lookup
//! 2. The conventional path (`convex/schema.ts` by default)
//! 3. Any file whose path ends with the conventional path
//! 4. Any file named like the schema file that a project config
//!    (`convex.json`) points at through its `functions` directory
//!
//! Candidates in steps 3 and 4 are tried in lexicographic path order so the
//! result never depends on the host's file enumeration order.
//!
//! Step 4 is broader than a single lookup at the project root: every file
//! named like the schema file is a candidate, and each one is checked against
//! the nearest project config in its own directory or an ancestor. This
//! covers monorepos where `convex.json` sits in a package below the root.

use crate::context::PluginContext;
use std::ffi::OsStr;
use std::path::Path;
use tablelens_core::project::{normalize, ProjectConfig};
use tablelens_host::{Program, SourceFile};

/// Find the file holding the schema declaration and remember its path
pub fn locate_schema_file<'p, P: Program>(ctx: &PluginContext, program: &'p P) -> Option<&'p P::File> {
    let conventional = ctx.config().conventional_schema_path();

    let found = from_hint(ctx, program)
        .or_else(|| program.source_file(&conventional))
        .or_else(|| by_suffix(program, &conventional))
        .or_else(|| by_project_config(ctx, program));

    match found {
        Some(file) => {
            ctx.hint().set(file.file_name());
            Some(file)
        }
        None => {
            tracing::trace!(conventional = %conventional, "schema file not found");
            None
        }
    }
}

fn from_hint<'p, P: Program>(ctx: &PluginContext, program: &'p P) -> Option<&'p P::File> {
    let hint = ctx.hint().get()?;
    let file = program.source_file(&hint);
    if file.is_none() {
        tracing::trace!(hint = %hint, "schema location hint is stale");
    }
    file
}

fn sorted_files<P: Program>(program: &P) -> Vec<&P::File> {
    let mut files = program.source_files();
    files.sort_by(|a, b| a.file_name().cmp(b.file_name()));
    files
}

fn by_suffix<'p, P: Program>(program: &'p P, conventional: &str) -> Option<&'p P::File> {
    sorted_files(program)
        .into_iter()
        .find(|file| file.file_name().ends_with(conventional))
}

fn by_project_config<'p, P: Program>(ctx: &PluginContext, program: &'p P) -> Option<&'p P::File> {
    let schema_file = OsStr::new(&ctx.config().schema_file);

    sorted_files(program)
        .into_iter()
        .filter(|file| Path::new(file.file_name()).file_name() == Some(schema_file))
        .find(|file| project_config_points_at(ctx, file.file_name()))
}

/// Whether the nearest project config above `file_name` names its directory
///
/// Unreadable or malformed configs count as "no".
fn project_config_points_at(ctx: &PluginContext, file_name: &str) -> bool {
    let config = ctx.config();
    let path = normalize(&config.resolve_path(file_name));

    let Some(config_path) = path
        .ancestors()
        .skip(1)
        .map(|dir| dir.join(&config.project_config_file))
        .find(|candidate| candidate.is_file())
    else {
        return false;
    };

    match ProjectConfig::from_file(&config_path) {
        Ok(project) => project
            .schema_path(&config.schema_file)
            .is_some_and(|schema_path| path.ends_with(schema_path)),
        Err(e) => {
            tracing::debug!(path = %config_path.display(), error = %e, "ignoring project config");
            false
        }
    }
}
