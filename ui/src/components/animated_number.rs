//! A number that counts up from zero the first time it scrolls into view.
//!
//! Each instance owns one [`Reveal`] plus two page-side resources keyed by
//! element id: a visibility watch (an `IntersectionObserver`) and a frame
//! pump (a `requestAnimationFrame` loop that reports each frame's timestamp).
//! Both stop when the reveal no longer needs them or the component unmounts,
//! whichever comes first.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use dioxus::prelude::*;
use tracing::{trace, warn};

use crate::core::config::CONFIG;
use crate::core::format::format_count;
use crate::core::reveal::Reveal;

static NEXT_WATCH_ID: AtomicU64 = AtomicU64::new(0);

struct RevealHost {
    reveal: Reveal,
    task: Option<Task>,
}

#[component]
pub fn AnimatedNumber(value: u64) -> Element {
    let watch_id = use_hook(|| {
        format!(
            "reveal-{}",
            NEXT_WATCH_ID.fetch_add(1, Ordering::Relaxed)
        )
    });
    let host = use_hook(|| {
        Rc::new(RefCell::new(RevealHost {
            reveal: Reveal::from_settings(value, &CONFIG.animation),
            task: None,
        }))
    });
    let displayed = use_signal(|| 0u64);

    let on_mounted = {
        let host = host.clone();
        let watch_id = watch_id.clone();
        move |_| {
            if host.borrow().task.is_some() {
                return;
            }
            let task = spawn(run_reveal(host.clone(), watch_id.clone(), displayed));
            host.borrow_mut().task = Some(task);
        }
    };

    use_drop({
        let host = host.clone();
        let watch_id = watch_id.clone();
        move || {
            let mut host = host.borrow_mut();
            let was_watching = host.reveal.is_watching();
            let was_animating = !was_watching && !host.reveal.is_settled();
            host.reveal.release();
            if let Some(task) = host.task.take() {
                task.cancel();
            }
            if was_watching {
                let _ = document::eval(&release_script(&watch_id));
            }
            if was_animating {
                let _ = document::eval(&stop_frames_script(&watch_id));
            }
        }
    });

    rsx! {
        span {
            id: "{watch_id}",
            class: "animated-number",
            onmounted: on_mounted,
            {format_count(displayed())}
        }
    }
}

async fn run_reveal(host: Rc<RefCell<RevealHost>>, watch_id: String, mut displayed: Signal<u64>) {
    let threshold = CONFIG.animation.visibility_threshold;

    // Observations and frames are both stamped on the page's clock, so the
    // animation window is measured in the same units the frames arrive in.
    let mut start_on_first_frame = false;
    let mut watch = document::eval(&watch_script(&watch_id, threshold));
    loop {
        match watch.recv::<(f64, f64)>().await {
            Ok((ratio, seen_at)) => {
                if host.borrow_mut().reveal.observe(ratio, seen_at) {
                    break;
                }
            }
            Err(err) => {
                // No observer available (or it vanished): show the value
                // rather than leaving a zero on screen.
                warn!(?err, id = %watch_id, "visibility watch unavailable; revealing immediately");
                start_on_first_frame = true;
                break;
            }
        }
        if host.borrow().reveal.is_released() {
            return;
        }
    }
    let _ = document::eval(&release_script(&watch_id));
    trace!(id = %watch_id, "reveal started");

    let mut frames = document::eval(&frame_script(&watch_id));
    loop {
        let timestamp = match frames.recv::<f64>().await {
            Ok(timestamp) => timestamp,
            Err(err) => {
                warn!(?err, id = %watch_id, "frame callback unavailable; settling");
                let value = host.borrow_mut().reveal.settle();
                displayed.set(value);
                break;
            }
        };
        let (value, more) = {
            let mut host = host.borrow_mut();
            if start_on_first_frame {
                start_on_first_frame = false;
                host.reveal.observe(1.0, timestamp);
            }
            host.reveal.on_frame(timestamp)
        };
        displayed.set(value);
        if !more {
            break;
        }
    }
    let _ = document::eval(&stop_frames_script(&watch_id));
    host.borrow_mut().task = None;
}

/// Installs an observer that reports `[ratio, time]` for every intersecting
/// entry of element `id` until released. It disconnects itself if the element
/// leaves the DOM.
pub fn watch_script(id: &str, threshold: f64) -> String {
    format!(
        r#"
const id = {id:?};
const threshold = {threshold};
const registry = (window.__revealWatches = window.__revealWatches || {{}});
const el = document.getElementById(id);
if (!el || typeof IntersectionObserver === "undefined") {{
  dioxus.send([1.0, performance.now()]);
}} else {{
  if (registry[id]) {{ registry[id].disconnect(); }}
  const observer = new IntersectionObserver((entries) => {{
    for (const entry of entries) {{
      if (!entry.target.isConnected) {{
        observer.disconnect();
        delete registry[id];
        return;
      }}
      if (entry.isIntersecting) {{
        dioxus.send([entry.intersectionRatio, entry.time]);
      }}
    }}
  }}, {{ threshold: [0, threshold, 1] }});
  registry[id] = observer;
  observer.observe(el);
}}
"#
    )
}

/// Disconnects and forgets the observer for `id`. Idempotent.
pub fn release_script(id: &str) -> String {
    format!(
        r#"
const registry = window.__revealWatches || {{}};
const observer = registry[{id:?}];
if (observer) {{
  observer.disconnect();
  delete registry[{id:?}];
}}
"#
    )
}

/// Sends the timestamp of every rendered frame until stopped or until the
/// element leaves the DOM. Frames pause with the page, as the browser pauses
/// `requestAnimationFrame` in hidden tabs.
pub fn frame_script(id: &str) -> String {
    format!(
        r#"
const id = {id:?};
const pumps = (window.__revealFrames = window.__revealFrames || {{}});
const token = {{}};
pumps[id] = token;
const step = (timestamp) => {{
  if (pumps[id] !== token) {{ return; }}
  const el = document.getElementById(id);
  if (!el || !el.isConnected) {{
    delete pumps[id];
    return;
  }}
  dioxus.send(timestamp);
  requestAnimationFrame(step);
}};
requestAnimationFrame(step);
"#
    )
}

/// Stops the frame pump for `id`. Idempotent.
pub fn stop_frames_script(id: &str) -> String {
    format!(
        r#"
const pumps = window.__revealFrames || {{}};
delete pumps[{id:?}];
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_script_targets_its_element() {
        let script = watch_script("reveal-7", 0.5);
        assert!(script.contains(r#"const id = "reveal-7";"#));
        assert!(script.contains("threshold: [0, threshold, 1]"));
        assert!(script.contains("const threshold = 0.5;"));
        assert!(script.contains("registry[id] = observer"));
    }

    #[test]
    fn observations_carry_the_page_clock() {
        let script = watch_script("reveal-7", 0.5);
        assert!(script.contains("dioxus.send([entry.intersectionRatio, entry.time])"));
        assert!(script.contains("dioxus.send([1.0, performance.now()])"));
    }

    #[test]
    fn release_script_is_keyed_and_guarded() {
        let script = release_script("reveal-7");
        assert!(script.contains(r#"registry["reveal-7"]"#));
        assert!(script.contains("if (observer)"));
        assert!(script.contains("disconnect()"));
    }

    #[test]
    fn frames_come_from_the_animation_frame_callback() {
        let script = frame_script("reveal-3");
        assert!(script.contains(r#"const id = "reveal-3";"#));
        assert!(script.contains("requestAnimationFrame(step)"));
        assert!(script.contains("dioxus.send(timestamp)"));
        assert!(script.contains("if (pumps[id] !== token)"));
        assert!(!script.contains("setTimeout"));
        assert!(!script.contains("setInterval"));
    }

    #[test]
    fn stopping_frames_clears_the_pump() {
        let script = stop_frames_script("reveal-3");
        assert!(script.contains(r#"delete pumps["reveal-3"]"#));
    }
}
