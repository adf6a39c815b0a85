//! Resume transformations: skill categorization and date display formatting.

use crate::domain::entities::{
    CategorizedSkills, ExperienceRecord, FormattedExperience, SkillRecord,
};
use crate::domain::error::DomainError;
use crate::util::date;

/// Category label of the synthetic always-first skill group.
pub const HIGHLIGHTS_CATEGORY: &str = "highlights";

/// Group skills by category in first-seen order and prepend the synthetic
/// `highlights` group.
///
/// The highlights group is present even when no skill is highlighted, and a
/// highlighted skill appears both there and in its own category group.
/// Within every group skills keep their input order. Total: empty input
/// yields exactly one empty highlights group.
pub fn categorize_skills(skills: &[SkillRecord]) -> Vec<CategorizedSkills> {
    let mut groups: Vec<CategorizedSkills> = Vec::new();
    for skill in skills {
        match groups
            .iter_mut()
            .find(|group| group.category == skill.category)
        {
            Some(group) => group.skills.push(skill.clone()),
            None => groups.push(CategorizedSkills {
                category: skill.category.clone(),
                skills: vec![skill.clone()],
            }),
        }
    }

    let highlighted = skills
        .iter()
        .filter(|skill| skill.is_highlight)
        .cloned()
        .collect();
    groups.insert(
        0,
        CategorizedSkills {
            category: HIGHLIGHTS_CATEGORY.to_string(),
            skills: highlighted,
        },
    );

    groups
}

/// Replace each record's raw start/end dates with `dd MonthName yyyy`
/// display strings, preserving order and all other fields.
///
/// The first unparseable date fails the whole batch; no fallback date is
/// ever substituted for a value that did not parse.
pub fn format_experiences(
    items: &[ExperienceRecord],
) -> Result<Vec<FormattedExperience>, DomainError> {
    items.iter().map(format_experience).collect()
}

fn format_experience(item: &ExperienceRecord) -> Result<FormattedExperience, DomainError> {
    Ok(FormattedExperience {
        id: item.id,
        category: item.category,
        organization: item.organization.clone(),
        title: item.title.clone(),
        role: item.role.clone(),
        content: item.content.clone(),
        start_date: display_raw(&item.start_date)?,
        end_date: display_raw(&item.end_date)?,
    })
}

fn display_raw(raw: &str) -> Result<String, DomainError> {
    let parsed = date::parse_raw(raw).ok_or_else(|| DomainError::invalid_date(raw))?;
    Ok(date::display(parsed))
}
