//! Polygon owner: source loops plus a shared profile, kept in sync with host objects.
//!
//! Purpose
//! - Run a full decoration pass (`layout`) and push its results into pooled
//!   host objects, one pool per `(loop, style, kind)`.
//! - Gate refreshes on a fingerprint of everything that affects output.
//!
//! Model
//! - Single-threaded and synchronous: a refresh runs top to bottom or not at all.
//! - The profile is shared through `Arc` and only ever read here.
//! - With no profile every slot is retired.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::fingerprint::{ChangeDetector, Fingerprint, Fold};
use crate::geom::{snap_anchor, Anchor, GeomCfg, Vertex, Winding};
use crate::layout::{layout, CapEnd, LoopLayout, StyleLayout};
use crate::pool::{PoolDelta, RenderObjectPool, RetirePolicy};
use crate::style::{EdgeStyle, FillTransform, Profile};

mod host;
mod source;

pub use host::{
    DecorationHost, DecorationKey, DecorationKind, LineDecoration, LineNode, SceneHost,
    SpriteDecoration, SpriteNode,
};
pub use source::SourceGeometry;

use host::{Lines, Sprites};

/// Host objects of one edge style on one loop.
#[derive(Debug)]
pub struct StylePools<L, S> {
    lines: RenderObjectPool<L>,
    sprites: RenderObjectPool<S>,
}

impl<L, S> Default for StylePools<L, S> {
    fn default() -> Self {
        Self {
            lines: RenderObjectPool::default(),
            sprites: RenderObjectPool::default(),
        }
    }
}

impl<L, S> StylePools<L, S> {
    #[inline]
    pub fn lines(&self) -> &RenderObjectPool<L> {
        &self.lines
    }

    /// Caps first, then corners.
    #[inline]
    pub fn sprites(&self) -> &RenderObjectPool<S> {
        &self.sprites
    }
}

/// Host objects of one loop.
#[derive(Debug)]
pub struct LoopPools<L, S> {
    styles: Vec<StylePools<L, S>>,
    junctions: RenderObjectPool<S>,
}

impl<L, S> Default for LoopPools<L, S> {
    fn default() -> Self {
        Self {
            styles: Vec::new(),
            junctions: RenderObjectPool::default(),
        }
    }
}

impl<L, S> LoopPools<L, S> {
    #[inline]
    pub fn styles(&self) -> &[StylePools<L, S>] {
        &self.styles
    }

    #[inline]
    pub fn junctions(&self) -> &RenderObjectPool<S> {
        &self.junctions
    }
}

/// What one refresh produced and how the pools moved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub loops: usize,
    pub styles: usize,
    pub segments: usize,
    pub caps: usize,
    pub corners: usize,
    pub junctions: usize,
    pub lines: PoolDelta,
    pub sprites: PoolDelta,
}

/// Decorates the loops of one source geometry with a shared profile.
pub struct Platform<H: DecorationHost> {
    source: SourceGeometry,
    profile: Option<Arc<Profile>>,
    cfg: GeomCfg,
    policy: RetirePolicy,
    detector: ChangeDetector,
    pools: Vec<LoopPools<H::Line, H::Sprite>>,
    layout: Vec<LoopLayout>,
}

impl<H: DecorationHost> Platform<H> {
    pub fn new(source: SourceGeometry) -> Self {
        Self {
            source,
            profile: None,
            cfg: GeomCfg::default(),
            policy: RetirePolicy::default(),
            detector: ChangeDetector::new(),
            pools: Vec::new(),
            layout: Vec::new(),
        }
    }

    pub fn with_profile(mut self, profile: Arc<Profile>) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_cfg(mut self, cfg: GeomCfg) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn with_policy(mut self, policy: RetirePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    pub fn source(&self) -> &SourceGeometry {
        &self.source
    }

    #[inline]
    pub fn profile(&self) -> Option<&Arc<Profile>> {
        self.profile.as_ref()
    }

    #[inline]
    pub fn policy(&self) -> RetirePolicy {
        self.policy
    }

    /// Takes effect at the next refresh; a changed policy forces that refresh.
    pub fn set_policy(&mut self, policy: RetirePolicy) {
        if self.policy != policy {
            self.detector.invalidate();
        }
        self.policy = policy;
    }

    pub fn set_loops(&mut self, loops: Vec<Vec<Vertex>>) {
        self.source.loops = loops;
    }

    pub fn set_invert(&mut self, invert: bool) {
        self.source.invert = invert;
    }

    pub fn set_profile(&mut self, profile: Option<Arc<Profile>>) {
        self.profile = profile;
    }

    /// Result of the latest refresh, one entry per loop.
    #[inline]
    pub fn layout(&self) -> &[LoopLayout] {
        &self.layout
    }

    /// Pooled host objects, one entry per loop (hidden loops included under `Hide`).
    #[inline]
    pub fn pools(&self) -> &[LoopPools<H::Line, H::Sprite>] {
        &self.pools
    }

    pub fn fill_transform(&self) -> Option<FillTransform> {
        self.profile.as_ref()?.fill.texture_transform()
    }

    pub fn collision_winding(&self) -> Winding {
        self.source.collision_winding()
    }

    /// Snap `point` onto loop `loop_index`.
    pub fn snap_anchor(&self, loop_index: usize, point: Vertex) -> Option<Anchor> {
        snap_anchor(point, self.source.loops.get(loop_index)?)
    }

    /// Fingerprint of the source and the profile contents.
    pub fn fingerprint(&self) -> u64 {
        let mut fold = Fold::new();
        self.source.fold_into(&mut fold);
        fold.option(self.profile.as_deref());
        fold.finish()
    }

    /// Refresh only if the source or profile changed since the last refresh.
    pub fn refresh_if_changed(&mut self, host: &mut H) -> Option<RefreshReport> {
        if !self.detector.consume_fingerprint(self.fingerprint()) {
            debug!("platform unchanged; refresh skipped");
            return None;
        }
        Some(self.rebuild(host))
    }

    /// Unconditional full refresh.
    pub fn refresh(&mut self, host: &mut H) -> RefreshReport {
        self.detector.consume_fingerprint(self.fingerprint());
        self.rebuild(host)
    }

    /// Retire every host object regardless of policy.
    pub fn teardown(&mut self, host: &mut H) -> PoolDelta {
        let mut delta = PoolDelta::default();
        for (li, lp) in self.pools.drain(..).enumerate() {
            for (si, mut sp) in lp.styles.into_iter().enumerate() {
                let key = slot_key(li, Some(si), DecorationKind::Line);
                delta.merge(sp.lines.sync_with(0, RetirePolicy::Destroy, &mut Lines { host: &mut *host, key }));
                let key = slot_key(li, Some(si), DecorationKind::Sprite);
                delta.merge(sp.sprites.sync_with(0, RetirePolicy::Destroy, &mut Sprites { host: &mut *host, key }));
            }
            let mut junctions = lp.junctions;
            let key = slot_key(li, None, DecorationKind::Junction);
            delta.merge(junctions.sync_with(0, RetirePolicy::Destroy, &mut Sprites { host: &mut *host, key }));
        }
        self.layout.clear();
        self.detector.invalidate();
        delta
    }

    fn rebuild(&mut self, host: &mut H) -> RefreshReport {
        let profile = self.profile.as_deref();
        let layouts = match profile {
            Some(p) => layout(&self.source.loops, p, &self.cfg),
            None => vec![LoopLayout::default(); self.source.loops.len()],
        };
        let mut report = RefreshReport {
            loops: layouts.len(),
            styles: profile.map_or(0, |p| p.edge_styles().len()),
            ..RefreshReport::default()
        };
        let policy = self.policy;
        let keep = self.pools.len().max(layouts.len());
        self.pools.resize_with(keep, LoopPools::default);
        let empty = LoopLayout::default();
        for (li, lp) in self.pools.iter_mut().enumerate() {
            let ll = layouts.get(li).unwrap_or(&empty);
            sync_loop(li, lp, ll, profile, policy, host, &mut report);
        }
        if policy == RetirePolicy::Destroy {
            self.pools.truncate(layouts.len());
        }
        self.layout = layouts;
        debug!(
            loops = report.loops,
            styles = report.styles,
            segments = report.segments,
            sprites = report.caps + report.corners + report.junctions,
            created = report.lines.created + report.sprites.created,
            revived = report.lines.revived + report.sprites.revived,
            retired = report.lines.retired + report.sprites.retired,
            "platform refreshed"
        );
        report
    }
}

fn slot_key(loop_index: usize, style: Option<usize>, kind: DecorationKind) -> DecorationKey {
    DecorationKey {
        loop_index,
        style,
        kind,
        index: 0,
    }
}

fn sync_loop<H: DecorationHost>(
    li: usize,
    lp: &mut LoopPools<H::Line, H::Sprite>,
    ll: &LoopLayout,
    profile: Option<&Profile>,
    policy: RetirePolicy,
    host: &mut H,
    report: &mut RefreshReport,
) {
    let styles = profile.map_or(&[][..], Profile::edge_styles);
    let keep = lp.styles.len().max(ll.styles.len());
    lp.styles.resize_with(keep, StylePools::default);
    for (si, sp) in lp.styles.iter_mut().enumerate() {
        let sl = ll.styles.get(si);
        let lines = sl.map_or(0, |s| s.segments.len());
        let sprites = sl.map_or(0, StyleLayout::sprite_count);
        let key = slot_key(li, Some(si), DecorationKind::Line);
        report
            .lines
            .merge(sp.lines.sync_with(lines, policy, &mut Lines { host: &mut *host, key }));
        let key = slot_key(li, Some(si), DecorationKind::Sprite);
        report
            .sprites
            .merge(sp.sprites.sync_with(sprites, policy, &mut Sprites { host: &mut *host, key }));
        if let (Some(sl), Some(style)) = (sl, styles.get(si)) {
            apply_style(sp, sl, style);
            report.segments += sl.segments.len();
            report.caps += sl.caps.len();
            report.corners += sl.corners.len();
            trace!(
                loop_index = li,
                style = %style.name,
                segments = sl.segments.len(),
                sprites = sl.sprite_count(),
                "style applied"
            );
        }
    }
    if policy == RetirePolicy::Destroy {
        lp.styles.truncate(ll.styles.len());
    }

    let key = slot_key(li, None, DecorationKind::Junction);
    report.sprites.merge(lp.junctions.sync_with(
        ll.junctions.len(),
        policy,
        &mut Sprites { host: &mut *host, key },
    ));
    if let Some(p) = profile {
        let junction_styles = p.junction_styles();
        for (obj, j) in lp.junctions.active_mut().iter_mut().zip(&ll.junctions) {
            let sprite = &junction_styles[j.junction].corner.sprite;
            obj.place(&sprite.transform_at(j.geometry.position, j.geometry.normal_angle));
        }
    }
    report.junctions += ll.junctions.len();
}

fn apply_style<L: LineDecoration, S: SpriteDecoration>(
    sp: &mut StylePools<L, S>,
    sl: &StyleLayout,
    style: &EdgeStyle,
) {
    for (line, seg) in sp.lines.active_mut().iter_mut().zip(&sl.segments) {
        line.apply(&seg.points, seg.closed, &style.line);
    }
    let (cap_slots, corner_slots) = sp.sprites.active_mut().split_at_mut(sl.caps.len());
    for (obj, cap) in cap_slots.iter_mut().zip(&sl.caps) {
        let sprite = match cap.end {
            CapEnd::Begin => style.caps.begin.as_ref(),
            CapEnd::End => style.caps.end.as_ref(),
        };
        if let Some(sprite) = sprite {
            obj.place(&sprite.transform_at(cap.position, cap.direction));
        }
    }
    for (obj, c) in corner_slots.iter_mut().zip(&sl.corners) {
        let sprite = &style.corners[c.corner].sprite;
        obj.place(&sprite.transform_at(c.geometry.position, c.geometry.normal_angle));
    }
}
