use std::collections::BTreeSet;
use std::path::PathBuf;
use topicloud_render::{RecordingCanvas, SvgCanvas, TopicCloud};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn cloud_small() -> serde_json::Value {
    let path = workspace_root().join("fixtures").join("cloud-small.json");
    let text = std::fs::read_to_string(&path).expect("fixture");
    serde_json::from_str(&text).expect("fixture json")
}

fn expected_color(label: &str) -> &'static str {
    match label {
        "Berlin" | "Music" | "Techno" | "Club" | "Sunrise" => "green",
        "Ibiza" | "Vinyl" | "Tickets" => "red",
        "DJ" | "Festival" | "Radio" | "Lineup" => "grey",
        other => panic!("unexpected label {other}"),
    }
}

fn drawn_cloud() -> TopicCloud<RecordingCanvas> {
    let mut cloud =
        TopicCloud::new(Some(RecordingCanvas::new(800.0, 600.0)), &cloud_small()).expect("cloud");
    cloud.generate().expect("generate");
    cloud
}

#[test]
fn cloud_small_draws_every_topic_once() {
    let cloud = drawn_cloud();
    assert_eq!(cloud.topic_count(), 12);

    let fill_texts = cloud
        .element()
        .instructions()
        .iter()
        .filter(|i| i.is_call("fillText"))
        .count();
    assert_eq!(fill_texts, cloud.topic_count());

    let painted: BTreeSet<String> = cloud
        .element()
        .painted_words()
        .into_iter()
        .map(|(label, _, _)| label)
        .collect();
    let labels: BTreeSet<String> = cloud.topics().keys().cloned().collect();
    assert_eq!(painted, labels);
}

#[test]
fn cloud_small_colors_follow_score_bands() {
    let cloud = drawn_cloud();
    for (label, fill, _) in cloud.element().painted_words() {
        assert_eq!(fill, expected_color(&label), "{label}");
    }
}

#[test]
fn cloud_small_uses_six_font_sizes() {
    let cloud = drawn_cloud();
    let fonts: BTreeSet<String> = cloud
        .element()
        .painted_words()
        .into_iter()
        .map(|(_, _, font)| font)
        .collect();
    assert_eq!(fonts.len(), 6, "{fonts:?}");
    assert!(fonts.contains("normal 60px Comic Sans MS, sans-serif"));
    assert!(fonts.contains("normal 10px Comic Sans MS, sans-serif"));

    // Music has the most mentions and takes the top tier.
    let music = cloud
        .placements()
        .iter()
        .find(|p| p.label == "Music")
        .expect("Music placed");
    assert_eq!(music.weight, 0);
    assert!((music.font_size - 60.0).abs() < 1e-9);
}

#[test]
fn cloud_small_drawing_is_deterministic() {
    let first = drawn_cloud().element().to_json();
    let second = drawn_cloud().element().to_json();
    assert_eq!(first, second);
}

#[test]
fn cloud_small_clicks_resolve_to_topic_details() {
    let mut cloud = drawn_cloud();
    let placements = cloud.placements().to_vec();
    for placed in &placements {
        let detail = cloud.click_at(placed.x, placed.y).expect("hit");
        assert_eq!(detail.label, placed.label);
        let metrics = cloud.topics()[placed.label.as_str()];
        assert_eq!(detail.total_mentions, metrics.total_mentions());
    }
}

#[test]
fn cloud_small_renders_to_svg() {
    let mut cloud =
        TopicCloud::new(Some(SvgCanvas::new(800.0, 600.0).with_id("topic-cloud")), &cloud_small())
            .expect("cloud");
    cloud.generate().expect("generate");
    assert_eq!(cloud.element().text_count(), 12);

    let svg = cloud.element().to_svg();
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" id="topic-cloud""#));
    assert!(svg.ends_with("</g></svg>"));
    for label in cloud.labels() {
        assert!(
            svg.contains(&format!(r#"data-label="{label}""#)),
            "{label} missing"
        );
    }
    assert!(svg.contains(r#"fill="red""#));
    assert!(svg.contains(r#"fill="grey""#));
    assert!(svg.contains(r#"fill="green""#));
}
