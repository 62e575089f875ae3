// src/data.rs

use crate::error::CatalogError;
use crate::model::Catalog;
use std::collections::HashSet;

/// Loads the content catalog embedded in the binary.
pub fn read_catalog_embedded() -> Result<Catalog, CatalogError> {
    let file_content = include_str!("data/catalog.yaml");
    parse_catalog(file_content)
}

/// Parses and validates a catalog. Progress code assumes every id referenced
/// by a path, a course or a badge exists, so a broken catalog is refused here.
pub fn parse_catalog(yaml: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = serde_yaml::from_str(yaml)?;
    validate(&catalog)?;
    log::debug!(
        "Catalog loaded: {} courses, {} quizzes, {} games, {} paths, {} badges",
        catalog.courses.len(),
        catalog.quizzes.len(),
        catalog.games.len(),
        catalog.learning_paths.len(),
        catalog.badges.len()
    );
    Ok(catalog)
}

fn unique_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<HashSet<&'a str>, CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(seen)
}

fn check_refs<'a>(
    owner: &str,
    kind: &'static str,
    ids: impl IntoIterator<Item = &'a str>,
    known: &HashSet<&str>,
) -> Result<(), CatalogError> {
    for id in ids {
        if !known.contains(id) {
            return Err(CatalogError::UnknownReference {
                owner: owner.to_string(),
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate(catalog: &Catalog) -> Result<(), CatalogError> {
    let courses = unique_ids("course", catalog.courses.iter().map(|c| c.id.as_str()))?;
    let quizzes = unique_ids("quiz", catalog.quizzes.iter().map(|q| q.id.as_str()))?;
    let games = unique_ids("game", catalog.games.iter().map(|g| g.id.as_str()))?;
    let paths = unique_ids(
        "learning path",
        catalog.learning_paths.iter().map(|p| p.id.as_str()),
    )?;
    let badges = unique_ids("badge", catalog.badges.iter().map(|b| b.id.as_str()))?;

    for quiz in &catalog.quizzes {
        for question in &quiz.questions {
            let malformed = |reason: &str| CatalogError::MalformedQuestion {
                quiz: quiz.id.clone(),
                question: question.id.clone(),
                reason: reason.to_string(),
            };
            if question.options.len() < 2 {
                return Err(malformed("needs at least two options"));
            }
            if question.correct_answer >= question.options.len() {
                return Err(malformed("correct answer is out of range"));
            }
        }
    }

    for course in &catalog.courses {
        check_refs(&course.id, "quiz", course.assessment.as_deref(), &quizzes)?;
    }

    for path in &catalog.learning_paths {
        check_refs(&path.id, "course", path.courses.iter().map(String::as_str), &courses)?;
        check_refs(&path.id, "quiz", path.quizzes.iter().map(String::as_str), &quizzes)?;
        check_refs(&path.id, "game", path.games.iter().map(String::as_str), &games)?;
    }

    for badge in catalog.badges.iter() {
        for (kind, id) in badge.rule.references() {
            let known = match kind {
                "quiz" => &quizzes,
                "course" => &courses,
                "game" => &games,
                "learning path" => &paths,
                _ => &badges,
            };
            check_refs(&badge.id, kind, [id], known)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badges::BadgeRule;
    use crate::model::Category;
    use assert_matches::assert_matches;

    #[test]
    fn embedded_catalog_is_valid() {
        let catalog = read_catalog_embedded().unwrap();
        assert_eq!(catalog.courses.len(), 3);
        assert!(catalog.quiz("password-quiz").is_some_and(|q| q.time_limit == Some(60)));
        assert_eq!(
            catalog
                .course_for_assessment("online-safety-assessment")
                .map(|c| c.id.as_str()),
            Some("online-safety-basics")
        );
        assert_eq!(catalog.learning_path("safe-explorer").unwrap().total_modules(), 4);
    }

    #[test]
    fn badge_rules_parse_from_tagged_maps() {
        let catalog = read_catalog_embedded().unwrap();
        let champion = catalog.badges.get("online-safety-champion").unwrap();
        assert_eq!(
            champion.rule,
            BadgeRule::CategoryCompleted {
                category: Category::OnlineSafety
            }
        );
        assert!(champion.rule.is_meta());
    }

    #[test]
    fn every_category_has_badges() {
        let catalog = read_catalog_embedded().unwrap();
        for category in Category::ALL {
            assert!(catalog.badges.in_category(category).next().is_some());
        }
    }

    #[test]
    fn duplicate_ids_are_refused() {
        let yaml = r#"
games:
  - { id: g, title: G, description: "", rounds: [] }
  - { id: g, title: G, description: "", rounds: [] }
"#;
        assert_matches!(
            parse_catalog(yaml),
            Err(CatalogError::DuplicateId { kind: "game", .. })
        );
    }

    #[test]
    fn dangling_references_are_refused() {
        let yaml = r#"
learning_paths:
  - { id: p, title: P, description: "", quizzes: [missing] }
"#;
        assert_matches!(
            parse_catalog(yaml),
            Err(CatalogError::UnknownReference { kind: "quiz", ref id, .. }) if id == "missing"
        );

        let yaml = r#"
badges:
  - id: b
    category: special-achievement
    title: B
    description: ""
    rule: { kind: badges_unlocked, badges: [ghost] }
"#;
        assert_matches!(
            parse_catalog(yaml),
            Err(CatalogError::UnknownReference { kind: "badge", .. })
        );
    }

    #[test]
    fn out_of_range_answers_are_refused() {
        let yaml = r#"
quizzes:
  - id: q
    title: Q
    category: online-safety
    questions:
      - { id: q1, prompt: "?", options: [a, b], correct_answer: 2 }
"#;
        assert_matches!(parse_catalog(yaml), Err(CatalogError::MalformedQuestion { .. }));
    }

    #[test]
    fn pass_score_defaults_to_seventy() {
        let yaml = r#"
games:
  - { id: g, title: G, description: "", rounds: [] }
"#;
        assert_eq!(parse_catalog(yaml).unwrap().games[0].pass_score, 70);
    }
}
