use super::*;

#[test]
fn close_typo_is_the_sole_match() {
    let result = match_names("Eldn Rings", ["Elden Ring", "The Last of Us"], None, 5);
    assert_eq!(result, vec!["Elden Ring"]);
}

#[test]
fn empty_pool_gives_empty_result() {
    let pool: [&str; 0] = [];
    assert!(match_names("Hades", pool, None, 5).is_empty());
}

#[test]
fn nothing_within_threshold_gives_empty_result() {
    let result = match_names("Celeste", ["Factorio", "Stardew Valley"], None, 5);
    assert!(result.is_empty());
}

#[test]
fn results_are_sorted_by_distance() {
    let pool = ["Portal 2", "Portal", "Postal"];
    let ranked = ranked_matches("Portal", pool, Some(4), 5);
    let distances: Vec<usize> = ranked.iter().map(|c| c.distance).collect();
    assert_eq!(distances, vec![0, 1, 2]);
    assert_eq!(ranked[0].name, "Portal");
    assert_eq!(ranked[1].name, "Postal");
}

#[test]
fn ties_keep_encounter_order() {
    let result = match_names("Doom", ["Room", "Boom", "Zoom"], Some(3), 5);
    assert_eq!(result, vec!["Room", "Boom", "Zoom"]);
}

#[test]
fn early_candidates_survive_a_later_better_match() {
    // A loose early hit is still reported after a closer one shows up.
    let result = match_names("Hollow Knight", ["Holow Nite", "Hollow Knight!"], None, 5);
    assert_eq!(result, vec!["Hollow Knight!", "Holow Nite"]);
}

#[test]
fn limit_truncates() {
    let pool = ["Dota", "Dota 2", "Dot", "Data", "Iota", "Rota"];
    let result = match_names("Dota", pool, Some(3), 2);
    assert_eq!(result.len(), 2);
    assert_eq!(result[0], "Dota");
}

#[test]
fn zero_threshold_falls_back_to_default() {
    // len("Halo") = 4 → default tolerance 2, so one edit still matches.
    assert_eq!(match_names("Halo", ["Hal0"], Some(0), 5), vec!["Hal0"]);
    assert_eq!(default_max_distance("Halo"), 2);
    assert_eq!(default_max_distance("Hades"), 3);
    assert_eq!(default_max_distance(""), 0);
}

#[test]
fn threshold_is_exclusive() {
    // distance("abc", "xyz") = 3; a tolerance of 3 must reject it.
    assert!(match_names("abc", ["xyz"], Some(3), 5).is_empty());
    assert_eq!(match_names("abc", ["xyz"], Some(4), 5), vec!["xyz"]);
}

#[test]
fn streaming_keeps_best_across_calls() {
    let mut matcher = StreamingMatcher::new("Celeste", 2);
    assert_eq!(matcher.update("Factorio"), vec!["Factorio"]);
    assert_eq!(matcher.update("Celest"), vec!["Celest", "Factorio"]);
    assert_eq!(matcher.update("Celeste"), vec!["Celeste", "Celest"]);
    // Worse than everything kept: result unchanged.
    assert_eq!(matcher.update("Stardew Valley"), vec!["Celeste", "Celest"]);
    assert_eq!(matcher.seen(), 4);
}

#[test]
fn streaming_ties_prefer_earlier_candidates() {
    let mut matcher = StreamingMatcher::new("Doom", 2);
    matcher.push("Room");
    matcher.push("Boom");
    matcher.push("Zoom");
    assert_eq!(matcher.current(), vec!["Room", "Boom"]);
}

#[test]
fn streaming_with_zero_keep_is_empty() {
    let mut matcher = StreamingMatcher::new("Doom", 0);
    assert!(matcher.update("Doom").is_empty());
}

#[test]
fn closure_form_accumulates_state() {
    let mut update = create_matcher("Hades", 3);
    update("Hades II");
    update("Hadez");
    let best = update("Halo");
    assert_eq!(best, vec!["Hadez", "Hades II", "Halo"]);
}

#[test]
fn streaming_matches_batch_ranking() {
    let pool = ["Inside", "Limbo", "Insider", "Outside"];
    let mut matcher = StreamingMatcher::new("Inside", pool.len());
    for name in pool {
        matcher.push(name);
    }
    let streamed: Vec<usize> = matcher.ranked().iter().map(|c| c.distance).collect();
    let batch: Vec<usize> = ranked_matches("Inside", pool, Some(100), pool.len())
        .iter()
        .map(|c| c.distance)
        .collect();
    assert_eq!(streamed, batch);
}
