//! The index page: a server-rendered cloud plus a detail panel.
//!
//! Every `<text>` node in the cloud carries `data-label`; the inline script looks the label up
//! in the embedded topic JSON and fills the panel on click.

use std::fmt::Write as _;
use topicloud::TopicMapping;

pub const CLOUD_ID: &str = "topic-cloud";

const SCRIPT: &str = r#"(function () {
  'use strict';
  var topics = JSON.parse(document.getElementById('topic-data').textContent);
  var set = function (id, value) { document.getElementById(id).textContent = value; };
  document.getElementById('topic-cloud').addEventListener('click', function (event) {
    var label = event.target.getAttribute && event.target.getAttribute('data-label');
    if (!label || !(label in topics)) { return; }
    var topic = topics[label];
    set('topic', '"' + label + '"');
    set('total-mentions', topic.positive + topic.negative + topic.neutral);
    set('neutral-mentions', topic.neutral);
    set('positive-mentions', topic.positive);
    set('negative-mentions', topic.negative);
  });
})();"#;

pub fn index(svg: &str, topics: &TopicMapping, pretty: bool) -> String {
    let data = if pretty {
        serde_json::to_string_pretty(topics)
    } else {
        serde_json::to_string(topics)
    }
    .unwrap_or_else(|_| "{}".to_string());

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n<title>Topic Cloud</title>\n");
    out.push_str("<link rel=\"stylesheet\" href=\"/css/main.css\">\n</head>\n<body>\n");
    out.push_str("<main class=\"layout\">\n<section class=\"cloud\">\n");
    out.push_str(svg);
    out.push_str("\n</section>\n<aside class=\"details\">\n");
    out.push_str("<h2>Information on topic <span id=\"topic\">-</span></h2>\n<dl>\n");
    for (id, title) in [
        ("total-mentions", "Total Mentions"),
        ("positive-mentions", "Positive Mentions"),
        ("neutral-mentions", "Neutral Mentions"),
        ("negative-mentions", "Negative Mentions"),
    ] {
        let _ = writeln!(&mut out, "<dt>{title}</dt><dd id=\"{id}\">-</dd>");
    }
    out.push_str("</dl>\n</aside>\n</main>\n");
    let _ = writeln!(
        &mut out,
        "<script type=\"application/json\" id=\"topic-data\">{}</script>",
        script_safe(&data)
    );
    let _ = writeln!(&mut out, "<script>\n{SCRIPT}\n</script>");
    out.push_str("</body>\n</html>\n");
    out
}

/// Keeps JSON from closing the surrounding `<script>` element early.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}
