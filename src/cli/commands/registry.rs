//! Registry command implementation

use std::fs;
use std::path::Path;

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{PipelineSpec, RegistryArgs, RegistryCommand};
use crate::storage::registry::{JsonFileRegistry, ModelRegistry, ModelStage, ModelVersion};

pub fn run_registry(
    spec: &PipelineSpec,
    args: RegistryArgs,
    level: LogLevel,
) -> Result<(), String> {
    let mut registry = JsonFileRegistry::open(&spec.registry.dir)
        .map_err(|e| format!("Failed to open model registry: {e}"))?;

    match args.command {
        RegistryCommand::Register { name, artifact } => {
            register(&mut registry, &name, &artifact, level)
        }
        RegistryCommand::Promote {
            name,
            version,
            stage,
            user,
        } => promote(&mut registry, &name, version, stage, user.as_deref(), level),
        RegistryCommand::List { name } => list(&registry, name.as_deref(), level),
        RegistryCommand::History { name } => history(&registry, &name, level),
    }
}

fn register(
    registry: &mut JsonFileRegistry,
    name: &str,
    artifact: &Path,
    level: LogLevel,
) -> Result<(), String> {
    let artifact = fs::canonicalize(artifact)
        .map_err(|e| format!("Model artifact '{}' not readable: {e}", artifact.display()))?;
    let uri = format!("file://{}", artifact.display());

    let version = registry
        .register_model(name, &uri)
        .map_err(|e| format!("Failed to register model: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Registered '{}' version {} ({})",
            version.name,
            version.version,
            version.reference()
        ),
    );
    log(level, LogLevel::Verbose, &format!("  Artifact: {uri}"));
    Ok(())
}

fn promote(
    registry: &mut JsonFileRegistry,
    name: &str,
    version: u32,
    stage: ModelStage,
    user: Option<&str>,
    level: LogLevel,
) -> Result<(), String> {
    registry
        .transition_stage(name, version, stage, user)
        .map_err(|e| format!("Failed to promote model: {e}"))?;
    log(
        level,
        LogLevel::Normal,
        &format!("Moved '{name}' version {version} to {stage}"),
    );
    Ok(())
}

fn list(registry: &JsonFileRegistry, name: Option<&str>, level: LogLevel) -> Result<(), String> {
    let Some(name) = name else {
        let models = registry.list_models();
        if models.is_empty() {
            log(
                level,
                LogLevel::Normal,
                &format!("No models registered in {}", registry.path().display()),
            );
            return Ok(());
        }
        for model in &models {
            let versions = registry.list_versions(model).map_err(|e| e.to_string())?;
            log(
                level,
                LogLevel::Normal,
                &format!("{model} ({} version(s))", versions.len()),
            );
        }
        return Ok(());
    };

    let versions = registry.list_versions(name).map_err(|e| e.to_string())?;
    let mut lines = vec![
        format!("{:<8} {:<12} {:<20} URI", "VERSION", "STAGE", "CREATED"),
        "-".repeat(60),
    ];
    lines.extend(versions.iter().map(format_version_row));
    log(level, LogLevel::Normal, &lines.join("\n"));
    Ok(())
}

/// One row of the version table
pub fn format_version_row(version: &ModelVersion) -> String {
    format!(
        "{:<8} {:<12} {:<20} {}",
        version.version,
        version.stage.as_str(),
        version.created_at.format("%Y-%m-%d %H:%M:%S"),
        version.artifact_uri
    )
}

fn history(registry: &JsonFileRegistry, name: &str, level: LogLevel) -> Result<(), String> {
    let transitions = registry
        .get_transition_history(name)
        .map_err(|e| e.to_string())?;
    if transitions.is_empty() {
        log(
            level,
            LogLevel::Normal,
            &format!("No stage transitions recorded for '{name}'"),
        );
        return Ok(());
    }

    for t in &transitions {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "{}  v{}  {} -> {}  {}",
                t.timestamp.format("%Y-%m-%d %H:%M:%S"),
                t.version,
                t.from_stage,
                t.to_stage,
                t.user.as_deref().unwrap_or("-")
            ),
        );
    }
    Ok(())
}
