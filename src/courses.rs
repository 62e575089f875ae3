use crate::error::ValidationError;
use crate::model::Course;
use crate::progress::{Timestamp, UserProgress, percent_of};

/// Marks `module_id` of `course` as done and recomputes the course
/// percentage. Returns `true` when the module was not done before.
pub fn complete_module(
    progress: &mut UserProgress,
    course: &Course,
    module_id: &str,
    now: Timestamp,
) -> Result<bool, ValidationError> {
    if !course.modules.iter().any(|m| m.id == module_id) {
        return Err(ValidationError::UnknownModule {
            course: course.id.clone(),
            module: module_id.to_string(),
        });
    }

    let entry = progress.courses.entry(course.id.clone()).or_default();
    let module = entry.modules.entry(module_id.to_string()).or_default();
    let newly = !module.completed;
    if newly {
        module.completed = true;
        module.completed_at = Some(now);
    }

    let done = course
        .modules
        .iter()
        .filter(|m| entry.modules.get(&m.id).is_some_and(|p| p.completed))
        .count();
    entry.progress = percent_of(done as u64, course.modules.len() as u64);
    entry.completed = entry.progress == 100;
    Ok(newly)
}

pub fn course_progress(progress: &UserProgress, course_id: &str) -> u8 {
    progress
        .courses
        .get(course_id)
        .map(|c| c.progress)
        .unwrap_or(0)
}
