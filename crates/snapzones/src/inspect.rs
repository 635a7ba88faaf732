//! The `plan`, `resolve` and `hit` commands.

use std::sync::Arc;

use config::Settings;
use snapzones_engine::{CandidateEntry, Hit, LayoutResolver, PopupGeometry, hit_test};
use snapzones_store::{AlgorithmRegistry, BuiltinAlgorithms, LayoutStore, MemoryLayoutStore};
use tracing::debug;
use zone_geom::{Point, Rect, effective_rect};

use crate::{
    cli::{ContextArgs, HitArgs, PlanArgs},
    error::Result,
    fixture::{Fixture, FixtureScreen},
};

/// Settings, fixture data and the chosen screen for one command.
pub struct Session {
    /// Resolved settings.
    pub settings: Settings,
    /// Screen being inspected.
    pub screen: FixtureScreen,
    /// Desktop from the command line.
    pub desktop: u32,
    /// Activity from the command line.
    pub activity: String,
    /// Store built from the fixture.
    pub store: Arc<MemoryLayoutStore>,
    /// Algorithms selected by the fixture.
    pub algorithms: Arc<BuiltinAlgorithms>,
}

impl Session {
    /// Load settings and the fixture named by `args`.
    pub fn open(args: &ContextArgs) -> Result<Self> {
        let settings = config::load_or_default(args.config.as_deref())?;
        let fixture = Fixture::load(&args.fixture)?;
        let screen = fixture.screen(args.screen.as_deref())?.clone();
        let store = Arc::new(fixture.build_store()?);
        debug!(
            screen = %screen.id,
            desktop = args.desktop,
            activity = %args.activity,
            version = store.version(),
            "session_opened"
        );
        Ok(Self {
            settings,
            screen,
            desktop: args.desktop,
            activity: args.activity.clone(),
            store,
            algorithms: Arc::new(fixture.algorithms()),
        })
    }

    /// A resolver over this session's store and algorithms.
    pub fn resolver(&self) -> LayoutResolver {
        let store: Arc<dyn LayoutStore> = self.store.clone();
        let algorithms: Arc<dyn AlgorithmRegistry> = self.algorithms.clone();
        LayoutResolver::new(store, algorithms)
    }

    /// Candidates for the session context, filtered by the snap mode.
    pub fn candidates(&self) -> Vec<CandidateEntry> {
        let (manual, autotile) = self.settings.candidate_filter();
        self.resolver().candidate_list(
            &self.screen.id,
            self.desktop,
            &self.activity,
            manual,
            autotile,
        )
    }

    /// Popup geometry for `count` items on the session screen.
    pub fn plan(&self, count: usize) -> PopupGeometry {
        let selector = self.settings.selector_for(&self.screen.id);
        PopupGeometry::plan(&selector, self.screen.geometry, count)
    }
}

/// Compact `x,y wxh` rendering.
pub fn fmt_rect(r: &Rect) -> String {
    format!("{:.1},{:.1} {:.1}x{:.1}", r.x, r.y, r.w, r.h)
}

/// Run `plan`.
pub fn plan(args: &PlanArgs) -> Result<()> {
    let session = Session::open(&args.context)?;
    let count = match args.count {
        Some(n) => n,
        None => session.candidates().len(),
    };
    let g = session.plan(count);
    println!("screen     {} {}", session.screen.id, fmt_rect(&g.screen));
    println!("anchor     {}", g.anchor);
    println!("items      {count}");
    println!(
        "indicator  {:.0}x{:.0} (scale {:.4})",
        g.indicator_width, g.indicator_height, g.preview_scale
    );
    println!(
        "grid       {} columns, {} of {} rows{}",
        g.columns,
        g.rows,
        g.total_rows,
        if g.needs_scrolling { ", scrolling" } else { "" }
    );
    println!("bar        {}", fmt_rect(&g.bar_rect()));
    println!("container  {}", fmt_rect(&g.container_rect()));
    println!("content    {}", fmt_rect(&g.content_rect()));
    if g.needs_scrolling {
        println!("max scroll {:.1}", g.max_scroll());
    }
    if args.cells {
        let origin = g.content_origin();
        for i in 0..count {
            let r = g.indicator_rect(i).translate(origin.x, origin.y);
            let (row, col) = g.cell(i);
            println!("cell {i:>3}   r{row} c{col} {}", fmt_rect(&r));
        }
    }
    Ok(())
}

/// Run `resolve`.
pub fn resolve(args: &ContextArgs) -> Result<()> {
    let session = Session::open(args)?;
    let resolver = session.resolver();
    match resolver.resolve_active(&session.screen.id, session.desktop, &session.activity) {
        Some(layout) => println!(
            "active     {} ({}, {} zones)",
            layout.id(),
            layout.name(),
            layout.zones().len()
        ),
        None => println!("active     none"),
    }
    let candidates = session.candidates();
    if candidates.is_empty() {
        println!("no candidates; the selector stays hidden");
    }
    for (i, c) in candidates.iter().enumerate() {
        println!(
            "{} {i:>3} {:<24} {:<8} {} zones",
            if c.active { "*" } else { " " },
            c.id,
            c.category,
            c.zone_count()
        );
    }
    Ok(())
}

/// Run `hit`.
pub fn hit(args: &HitArgs) -> Result<()> {
    let session = Session::open(&args.context)?;
    let entries = session.candidates();
    let g = session.plan(entries.len());
    let pointer = Point::new(args.x, args.y);
    let scroll = g.clamp_scroll(args.scroll);

    if !g.content_rect().contains(pointer) {
        println!("miss (outside the popup content {})", fmt_rect(&g.content_rect()));
        return Ok(());
    }
    let origin = g.content_origin();
    let local = Point::new(pointer.x - origin.x, pointer.y - origin.y + scroll);
    let gaps = session.settings.gaps;
    match hit_test(local, &g, &entries, &gaps) {
        Hit::Zone {
            entry,
            layout_id,
            zone,
        } => {
            let relative = entries[entry].zones[zone];
            let target = effective_rect(&relative, &session.screen.geometry, &gaps);
            println!("zone       {layout_id} #{} (entry {entry})", zone + 1);
            println!("relative   {:.4},{:.4} {:.4}x{:.4}", relative.x, relative.y, relative.w, relative.h);
            println!("target     {}", fmt_rect(&target));
        }
        Hit::Layout { entry, layout_id } => {
            println!("layout     {layout_id} (entry {entry}), between zones");
        }
        Hit::Miss => println!("miss"),
    }
    Ok(())
}
