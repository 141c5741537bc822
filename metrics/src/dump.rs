use crate::{classes::COUNTER_CLASS_NAMES, classes::TIMER_CLASS_NAMES, Metrics, TIMER_CLASS_COUNT};
use std::fs::File;
use std::io::Write;

pub(crate) fn dump(metrics: &Metrics) {
    println!("Some metrics were tracked:");
    for i in 0..TIMER_CLASS_COUNT {
        println!(
            "\t{:.6} s spent {}.",
            metrics.totals[i].as_secs_f64(),
            TIMER_CLASS_NAMES[i]
        );
    }
    for (i, name) in COUNTER_CLASS_NAMES.iter().enumerate() {
        println!("\t{} {}.", metrics.counters[i], name);
    }

    if metrics.intervals.iter().all(Option::is_none) {
        tracing::debug!(rank = metrics.rank, "no interval recording enabled, skipping json dump");
        return;
    }

    let mut object = serde_json::Map::new();
    for i in 0..TIMER_CLASS_COUNT {
        if let Some(points) = &metrics.intervals[i] {
            let arr: Vec<serde_json::Value> = points
                .iter()
                .map(|p| serde_json::json!([p.start, p.stop]))
                .collect();
            object.insert(TIMER_CLASS_NAMES[i].to_string(), serde_json::Value::Array(arr));
        }
    }
    let body = serde_json::json!({ format!("rank {}", metrics.rank): object });

    let filename = format!("rank{}.json", metrics.rank);
    match File::create(&filename) {
        Ok(mut f) => {
            if let Err(e) = writeln!(f, "{body}") {
                tracing::warn!(error = %e, filename, "failed writing metrics json");
            }
        }
        Err(e) => tracing::warn!(error = %e, filename, "failed creating metrics json file"),
    }
}
