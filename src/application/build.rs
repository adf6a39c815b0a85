//! Build orchestration: assemble page props and write them to disk.

use std::path::Path;

use serde::Serialize;
use tokio::fs;
use tracing::info;

use crate::application::{error::AppError, props};
use crate::config::Settings;
use crate::infra::{backend::BackendClient, content::ContentStore, error::InfraError};

pub const HOME_PROPS_FILE: &str = "home.json";
pub const RESUME_PROPS_FILE: &str = "resume.json";

/// Fetch and transform everything, then write `home.json` and
/// `resume.json` under the output directory.
pub async fn run_build(settings: &Settings) -> Result<(), AppError> {
    let (home, resume) = assemble(settings).await?;

    fs::create_dir_all(&settings.site.output_dir)
        .await
        .map_err(InfraError::from)?;
    write_props(&settings.site.output_dir.join(HOME_PROPS_FILE), &home).await?;
    write_props(&settings.site.output_dir.join(RESUME_PROPS_FILE), &resume).await?;

    info!(
        output = %settings.site.output_dir.display(),
        blogs = home.blogs.len(),
        skill_groups = resume.skills.len(),
        "page props written"
    );
    Ok(())
}

/// Run the same fetch/load/validate pass as a build without writing output.
pub async fn run_check(settings: &Settings) -> Result<(), AppError> {
    let (home, resume) = assemble(settings).await?;

    info!(
        highlighted_skills = home.skills.len(),
        blogs = home.blogs.len(),
        work = resume.work_experiences.len(),
        education = resume.education_experiences.len(),
        skill_groups = resume.skills.len(),
        "backend data and blog content are valid"
    );
    Ok(())
}

async fn assemble(settings: &Settings) -> Result<(props::HomeProps, props::ResumeProps), AppError> {
    let backend = BackendClient::new(&settings.backend)?;
    let content = ContentStore::new(settings.site.content_dir.clone());

    let home = props::home_props(&backend, &content, settings.site.recent_blog_count).await?;
    let resume = props::resume_props(&backend).await?;
    Ok((home, resume))
}

async fn write_props<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let json = serde_json::to_vec_pretty(value)
        .map_err(|err| AppError::unexpected(format!("failed to serialize props: {err}")))?;
    fs::write(path, json).await.map_err(InfraError::from)?;
    Ok(())
}
