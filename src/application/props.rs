//! Page props assembly: fetch, transform, and shape data for rendering.

use serde::Serialize;

use crate::application::{blog, error::AppError, resume};
use crate::domain::entities::{CategorizedSkills, FormattedExperience, SkillRecord};
use crate::domain::types::ExperienceCategory;
use crate::infra::{backend::BackendClient, content::ContentStore};
use crate::util::date;

/// Props for the resume page: formatted timelines plus the full
/// categorized skill list.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeProps {
    pub work_experiences: Vec<FormattedExperience>,
    pub education_experiences: Vec<FormattedExperience>,
    pub skills: Vec<CategorizedSkills>,
}

/// One blog entry on the home page, with its date already formatted for
/// display.
#[derive(Debug, Clone, Serialize)]
pub struct BlogCard {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub date: String,
}

/// Props for the home page: highlighted skills and the most recent posts.
#[derive(Debug, Clone, Serialize)]
pub struct HomeProps {
    pub skills: Vec<SkillRecord>,
    pub blogs: Vec<BlogCard>,
}

/// Assemble the resume page props from backend data.
pub async fn resume_props(backend: &BackendClient) -> Result<ResumeProps, AppError> {
    let work = backend.experiences(ExperienceCategory::Work).await?;
    let education = backend.experiences(ExperienceCategory::Education).await?;
    let skills = backend.skills().await?;

    Ok(ResumeProps {
        work_experiences: resume::format_experiences(&work)?,
        education_experiences: resume::format_experiences(&education)?,
        skills: resume::categorize_skills(&skills),
    })
}

/// Assemble the home page props from backend data and local blog content.
pub async fn home_props(
    backend: &BackendClient,
    content: &ContentStore,
    recent_blog_count: usize,
) -> Result<HomeProps, AppError> {
    let skills = backend
        .skills()
        .await?
        .into_iter()
        .filter(|skill| skill.is_highlight)
        .collect();

    let blogs = content.blog_metadata().await?;
    let recent = blog::top_recent(&blogs, recent_blog_count)
        .into_iter()
        .map(|blog| BlogCard {
            date: date::display(blog.date),
            slug: blog.slug,
            title: blog.title,
            description: blog.description,
        })
        .collect();

    Ok(HomeProps {
        skills,
        blogs: recent,
    })
}
