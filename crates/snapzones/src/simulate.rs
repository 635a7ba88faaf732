//! The `simulate` command: replay a drag through a real [`ZoneSelector`].
//!
//! The selector runs on a current-thread runtime with a paused clock, so sampler and collapse
//! timers fire at exact virtual times and the output is reproducible.

use std::{sync::Arc, time::Duration};

use snapzones_engine::{ScreenContext, SelectorEvent, ZoneSelector};
use snapzones_store::{AlgorithmRegistry, LayoutStore};
use tokio::{
    runtime::Builder,
    sync::mpsc,
    time::{self, Instant},
};
use tracing::info;
use zone_geom::Point;

use crate::{
    cli::SimulateArgs,
    error::{Error, Result},
    inspect::{Session, fmt_rect},
};

/// Parse `x,y`.
fn parse_point(raw: &str) -> Result<Point> {
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| Error::other(format!("bad coordinate {v:?} in {raw:?}: {e}")))
    };
    match raw.split_once(',') {
        Some((x, y)) => Ok(Point::new(parse(x)?, parse(y)?)),
        None => Err(Error::other(format!("expected X,Y, got {raw:?}"))),
    }
}

/// One line per event, stamped with virtual milliseconds since the drag began.
fn print_event(at: Duration, ev: &SelectorEvent) {
    let ms = at.as_millis();
    match ev {
        SelectorEvent::StateChanged {
            state,
            visible,
            proximity,
        } => println!("{ms:>6}ms state     {state} visible={visible} proximity={proximity:.3}"),
        SelectorEvent::PopupChanged(m) => println!(
            "{ms:>6}ms popup     {} entries, {}x{} grid, bar {}, scroll {:.1}",
            m.entries.len(),
            m.geometry.columns,
            m.geometry.rows,
            fmt_rect(&m.geometry.bar_rect()),
            m.scroll_offset
        ),
        SelectorEvent::Hovered { layout_id, zone } => match (layout_id, zone) {
            (Some(id), Some(z)) => println!("{ms:>6}ms hover     {id} zone {}", z + 1),
            (Some(id), None) => println!("{ms:>6}ms hover     {id}"),
            _ => println!("{ms:>6}ms hover     none"),
        },
        SelectorEvent::SelectionMade(sel) => println!(
            "{ms:>6}ms selected  {} zone {} -> {}",
            sel.layout_id,
            sel.zone_index + 1,
            fmt_rect(&sel.target)
        ),
    }
}

/// Run `simulate`.
pub fn run(args: &SimulateArgs) -> Result<()> {
    let session = Session::open(&args.context)?;
    let path = args
        .path
        .iter()
        .map(|p| parse_point(p))
        .collect::<Result<Vec<_>>>()?;
    let runtime = Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()?;
    runtime.block_on(drive(session, &path, args))
}

/// Drag along `path`, printing every selector event.
async fn drive(session: Session, path: &[Point], args: &SimulateArgs) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let start = Instant::now();
    let printer = tokio::spawn(async move {
        while let Some(ev) = rx.recv().await {
            print_event(start.elapsed(), &ev);
        }
    });

    let mut context = ScreenContext::new(session.screen.id.clone(), session.screen.geometry);
    context.desktop = session.desktop;
    context.activity = session.activity.clone();
    let store: Arc<dyn LayoutStore> = session.store.clone();
    let algorithms: Arc<dyn AlgorithmRegistry> = session.algorithms.clone();
    let selector = ZoneSelector::new(context, session.settings.clone(), store, algorithms, tx);

    let dwell = Duration::from_millis(args.dwell_ms);
    selector.drag_started()?;
    for p in path {
        println!("{:>6}ms pointer   {:.1},{:.1}", start.elapsed().as_millis(), p.x, p.y);
        selector.drag_pointer_moved(p.x, p.y)?;
        time::sleep(dwell).await;
    }
    time::sleep(Duration::from_millis(args.hold_ms)).await;

    let selection = selector.drag_ended()?;
    selector.shutdown().await;
    drop(selector);
    printer
        .await
        .map_err(|e| Error::other(format!("event printer failed: {e}")))?;

    match selection {
        Some(sel) => info!(layout = %sel.layout_id, zone = sel.zone_index, "simulated_selection"),
        None => println!("no selection"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_parse_with_whitespace_and_signs() {
        assert_eq!(parse_point("960,5").unwrap(), Point::new(960.0, 5.0));
        assert_eq!(parse_point(" -10.5 , 3 ").unwrap(), Point::new(-10.5, 3.0));
        assert!(parse_point("960").is_err());
        assert!(parse_point("a,b").is_err());
    }
}
