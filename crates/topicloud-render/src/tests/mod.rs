use crate::*;
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use topicloud_core::{MetricField, ShapeViolation, TopicDetail};

/// Stand-in for a non-canvas DOM node such as `<body>`.
struct Body;

impl Element for Body {
    fn tag_name(&self) -> &str {
        "body"
    }

    fn canvas(&self) -> Option<&dyn Canvas2d> {
        None
    }

    fn canvas_mut(&mut self) -> Option<&mut dyn Canvas2d> {
        None
    }
}

fn two_cities() -> serde_json::Value {
    json!({
        "Berlin": { "score": 80, "positive": 6, "negative": 1, "neutral": 2 },
        "Paris": { "score": 35, "positive": 1, "negative": 4, "neutral": 3 }
    })
}

fn canvas() -> RecordingCanvas {
    RecordingCanvas::new(600.0, 400.0)
}

#[test]
fn rejects_non_canvas_and_missing_elements() {
    let err = TopicCloud::new(Some(Body), &two_cities()).unwrap_err();
    let Error::InvalidSurface { reason } = err else {
        panic!("expected InvalidSurface, got {err:?}");
    };
    assert!(reason.contains("<body>"), "{reason}");

    let err = TopicCloud::<RecordingCanvas>::new(None, &two_cities()).unwrap_err();
    assert!(matches!(err, Error::InvalidSurface { .. }), "{err:?}");
}

#[test]
fn rejects_canvas_without_area() {
    let err = TopicCloud::new(Some(RecordingCanvas::new(0.0, 300.0)), &two_cities()).unwrap_err();
    assert!(matches!(err, Error::InvalidSurface { .. }), "{err:?}");
}

#[test]
fn rejects_canvas_larger_than_the_side_limit() {
    let err = TopicCloud::new(Some(RecordingCanvas::new(1e300, 600.0)), &two_cities()).unwrap_err();
    let Error::InvalidSurface { reason } = err else {
        panic!("expected InvalidSurface, got {err:?}");
    };
    assert!(reason.contains("larger than"), "{reason}");

    let tall = RecordingCanvas::new(600.0, MAX_CANVAS_SIDE + 1.0);
    assert!(TopicCloud::new(Some(tall), &two_cities()).is_err());

    let side = MAX_CANVAS_SIDE;
    let mut cloud = TopicCloud::new(Some(RecordingCanvas::new(side, side)), &two_cities()).unwrap();
    assert_eq!(cloud.generate().unwrap().len(), 2);
}

#[test]
fn rejects_null_metric_naming_label_and_field() {
    let mut topics = two_cities();
    topics["Berlin"]["positive"] = serde_json::Value::Null;

    let err = TopicCloud::new(Some(canvas()), &topics).unwrap_err();
    let Error::InvalidTopicShape(violation) = &err else {
        panic!("expected InvalidTopicShape, got {err:?}");
    };
    assert_eq!(
        *violation,
        ShapeViolation::NotANumber {
            label: "Berlin".to_string(),
            field: MetricField::Positive
        }
    );
    assert!(err.to_string().contains("Berlin"));
    assert!(err.to_string().contains("positive"));
}

#[test]
fn rejects_topics_that_are_not_a_mapping() {
    let err = TopicCloud::new(Some(canvas()), &json!(["Berlin", "Paris"])).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidTopicShape(ShapeViolation::NotAMapping)
    ));
}

#[test]
fn capability_probe_is_consulted_on_every_construction() {
    let calls = Cell::new(0u32);
    let supported = Cell::new(true);
    let probe = || {
        calls.set(calls.get() + 1);
        supported.get()
    };

    assert!(TopicCloud::with_probe(&probe, Some(canvas()), &two_cities()).is_ok());
    supported.set(false);
    let err = TopicCloud::with_probe(&probe, Some(canvas()), &two_cities()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedEnvironment));
    assert_eq!(calls.get(), 2);

    assert!(TopicCloud::<RecordingCanvas>::is_supported(&HeadlessProbe));
    assert!(!TopicCloud::<RecordingCanvas>::is_supported(&|| false));
}

#[test]
fn unsupported_environment_is_reported_before_surface_problems() {
    let err = TopicCloud::with_probe(&|| false, Some(Body), &two_cities()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedEnvironment));
}

#[test]
fn topic_count_matches_distinct_labels() {
    let cloud = TopicCloud::new(Some(canvas()), &two_cities()).unwrap();
    assert_eq!(cloud.topic_count(), 2);
    assert_eq!(cloud.config(), &CloudConfig::default());
    assert_eq!(cloud.config().weight_factor, 60.0);
    assert_eq!(cloud.config().font_family, "Comic Sans MS, sans-serif");
}

#[test]
fn labels_are_ranked_by_mentions_then_name() {
    let topics = json!({
        "zeta": { "score": 50, "positive": 1, "negative": 1, "neutral": 1 },
        "alpha": { "score": 50, "positive": 3, "negative": 0, "neutral": 0 },
        "mid": { "score": 50, "positive": 5, "negative": 5, "neutral": 5 }
    });
    let mut cloud = TopicCloud::new(Some(canvas()), &topics).unwrap();
    assert_eq!(cloud.labels(), ["mid", "alpha", "zeta"]);

    cloud.set_label_order(LabelOrder::Insertion);
    assert_eq!(cloud.labels(), ["zeta", "alpha", "mid"]);
}

#[test]
fn only_the_latest_finish_callback_fires() {
    let first = Rc::new(Cell::new(0u32));
    let second = Rc::new(Cell::new(0u32));

    let mut cloud = TopicCloud::new(Some(canvas()), &two_cities()).unwrap();
    let f = Rc::clone(&first);
    cloud.on_finished_draw(move || f.set(f.get() + 1));
    let s = Rc::clone(&second);
    cloud.on_finished_draw(move || s.set(s.get() + 1));

    cloud.generate().unwrap();
    cloud.generate().unwrap();
    assert_eq!(first.get(), 0);
    assert_eq!(second.get(), 2);
}

#[test]
fn generate_redraws_from_scratch() {
    let mut cloud = TopicCloud::new(Some(canvas()), &two_cities()).unwrap();
    cloud.generate().unwrap();
    let first = cloud.element().instructions().to_vec();
    cloud.generate().unwrap();
    assert_eq!(cloud.element().instructions(), first.as_slice());

    let fill_texts = first.iter().filter(|i| i.is_call("fillText")).count();
    assert_eq!(fill_texts, 2);
    assert!(first[0].is_call("clearRect"));
}

#[test]
fn click_reports_merged_topic_detail_to_latest_callback() {
    let seen: Rc<RefCell<Vec<TopicDetail>>> = Rc::default();
    let stale = Rc::new(Cell::new(false));

    let mut cloud = TopicCloud::new(Some(canvas()), &two_cities()).unwrap();
    let flag = Rc::clone(&stale);
    cloud.on_clicked_topic(move |_| flag.set(true));
    let sink = Rc::clone(&seen);
    cloud.on_clicked_topic(move |detail| sink.borrow_mut().push(detail.clone()));

    let placed = cloud.generate().unwrap().to_vec();
    let berlin = placed.iter().find(|p| p.label == "Berlin").unwrap();

    let detail = cloud.click_at(berlin.x, berlin.y).unwrap();
    assert_eq!(detail.label, "Berlin");
    assert_eq!(detail.metrics.score, 80.0);
    assert_eq!(detail.metrics.positive, 6.0);
    assert_eq!(detail.total_mentions, 9.0);
    assert_eq!(seen.borrow().as_slice(), [detail]);
    assert!(!stale.get());

    assert!(cloud.click_at(-10.0, -10.0).is_none());
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn click_before_generate_hits_nothing() {
    let mut cloud = TopicCloud::new(Some(canvas()), &two_cities()).unwrap();
    assert!(cloud.click_at(300.0, 200.0).is_none());
}

#[test]
fn colors_follow_sentiment_bands() {
    let mut cloud = TopicCloud::new(Some(canvas()), &two_cities()).unwrap();
    cloud.generate().unwrap();
    let painted = cloud.element().painted_words();
    let berlin = painted.iter().find(|(l, _, _)| l == "Berlin").unwrap();
    let paris = painted.iter().find(|(l, _, _)| l == "Paris").unwrap();
    assert_eq!(berlin.1, "green");
    assert_eq!(paris.1, "red");
}

#[test]
fn config_setters_reach_the_layout() {
    let mut cloud = TopicCloud::new(Some(canvas()), &two_cities()).unwrap();
    cloud.set_font_family("serif");
    cloud.set_weight_factor(30.0);
    cloud.set_allow_rotation(true);
    cloud.set_seed(3);
    cloud.generate().unwrap();

    assert_eq!(cloud.config().rotate_ratio(), 0.5);
    // Berlin has the most mentions: top tier of a two-word cloud is 2/6 of the factor.
    let fonts: Vec<String> = cloud
        .element()
        .painted_words()
        .into_iter()
        .map(|(_, _, font)| font)
        .collect();
    assert_eq!(fonts, vec!["normal 10px serif", "normal 5px serif"]);
}

#[test]
fn custom_layout_receives_ordered_word_list() {
    struct Capture(Rc<RefCell<Vec<(String, usize, f64, String)>>>);

    impl WordCloudLayout for Capture {
        fn draw(
            &self,
            _canvas: &mut dyn Canvas2d,
            request: &WordCloudRequest<'_>,
        ) -> Vec<PlacedWord> {
            for (label, weight) in &request.list {
                self.0.borrow_mut().push((
                    label.clone(),
                    *weight,
                    (request.size)(*weight),
                    (request.color)(label),
                ));
            }
            Vec::new()
        }
    }

    let seen: Rc<RefCell<Vec<(String, usize, f64, String)>>> = Rc::default();
    let mut cloud = TopicCloud::new(Some(canvas()), &two_cities())
        .unwrap()
        .with_layout(Capture(Rc::clone(&seen)));
    assert!(cloud.generate().unwrap().is_empty());

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].0, "Berlin");
    assert_eq!(seen[0].1, 0);
    assert!((seen[0].2 - 20.0).abs() < 1e-9);
    assert_eq!(seen[0].3, "green");
    assert_eq!(seen[1].0, "Paris");
    assert!((seen[1].2 - 10.0).abs() < 1e-9);
    assert_eq!(seen[1].3, "red");
}

#[derive(Debug, Clone, PartialEq)]
struct SeenFlags {
    shuffle: bool,
    draw_out_of_bound: bool,
    rotate_ratio: f64,
    seed: u64,
    font_family: String,
}

struct CaptureFlags(Rc<RefCell<Vec<SeenFlags>>>);

impl WordCloudLayout for CaptureFlags {
    fn draw(&self, _canvas: &mut dyn Canvas2d, request: &WordCloudRequest<'_>) -> Vec<PlacedWord> {
        self.0.borrow_mut().push(SeenFlags {
            shuffle: request.shuffle,
            draw_out_of_bound: request.draw_out_of_bound,
            rotate_ratio: request.rotate_ratio,
            seed: request.seed,
            font_family: request.font_family.to_string(),
        });
        Vec::new()
    }
}

#[test]
fn shuffle_and_out_of_bound_setters_reach_the_request() {
    let seen: Rc<RefCell<Vec<SeenFlags>>> = Rc::default();
    let mut cloud = TopicCloud::new(Some(canvas()), &two_cities())
        .unwrap()
        .with_layout(CaptureFlags(Rc::clone(&seen)));

    cloud.generate().unwrap();
    cloud.set_shuffle(true);
    cloud.set_draw_out_of_bound(true);
    cloud.set_allow_rotation(true);
    cloud.set_seed(9);
    cloud.set_font_family("serif");
    cloud.generate().unwrap();

    let seen = seen.borrow();
    assert_eq!(
        seen.as_slice(),
        [
            SeenFlags {
                shuffle: false,
                draw_out_of_bound: false,
                rotate_ratio: 0.0,
                seed: 0,
                font_family: "Comic Sans MS, sans-serif".to_string(),
            },
            SeenFlags {
                shuffle: true,
                draw_out_of_bound: true,
                rotate_ratio: 0.5,
                seed: 9,
                font_family: "serif".to_string(),
            },
        ]
    );
    assert!(cloud.config().shuffle);
    assert!(cloud.config().draw_out_of_bound);
}

#[test]
fn empty_mapping_draws_nothing_and_still_finishes() {
    let finished = Rc::new(Cell::new(0u32));
    let mut cloud = TopicCloud::new(Some(canvas()), &json!({})).unwrap();
    assert_eq!(cloud.topic_count(), 0);
    assert!(cloud.labels().is_empty());

    let f = Rc::clone(&finished);
    cloud.on_finished_draw(move || f.set(f.get() + 1));
    assert!(cloud.generate().unwrap().is_empty());
    assert_eq!(finished.get(), 1);

    let log = cloud.element().instructions();
    assert_eq!(log.len(), 1);
    assert!(log[0].is_call("clearRect"));
    assert!(cloud.click_at(300.0, 200.0).is_none());
}
