use super::*;
use crate::geom::AngleRange;
use crate::style::{CapStyle, CornerKind, CornerStyle, EdgeFilter, JunctionStyle, SpriteStyle};
use nalgebra::vector;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

fn square() -> Vec<Vertex> {
    vec![
        vector![0.0, 0.0],
        vector![10.0, 0.0],
        vector![10.0, 10.0],
        vector![0.0, 10.0],
    ]
}

fn right_zone() -> EdgeStyle {
    EdgeStyle::new("right", AngleRange::new(-FRAC_PI_4, FRAC_PI_4))
}

fn top_zone() -> EdgeStyle {
    EdgeStyle::new("top", AngleRange::new(FRAC_PI_4, 3.0 * FRAC_PI_4))
}

#[test]
fn square_with_rightward_zone() {
    let profile = Profile::with_edge_styles([right_zone()]);
    let out = layout_loop(&square(), &profile, &GeomCfg::default());
    assert_eq!(out.styles.len(), 1);
    let segs = &out.styles[0].segments;
    assert_eq!(segs.len(), 1);
    assert_eq!(segs[0].points, vec![vector![10.0, 0.0], vector![10.0, 10.0]]);
    assert!(!segs[0].closed);
    assert!(out.styles[0].corners.is_empty());
    assert!(out.junctions.is_empty());
}

#[test]
fn full_circle_zone_closes_and_decorates_every_vertex() {
    let style = EdgeStyle::new("all", AngleRange::FULL)
        .with_corner(CornerStyle::new(CornerKind::Convex, FRAC_PI_4));
    let mut style = style;
    style.caps = CapStyle {
        enabled: true,
        begin: Some(SpriteStyle::default()),
        end: Some(SpriteStyle::default()),
    };
    let profile = Profile::with_edge_styles([style]);
    let out = layout_loop(&square(), &profile, &GeomCfg::default());
    let sl = &out.styles[0];
    assert_eq!(sl.segments.len(), 1);
    assert!(sl.segments[0].closed);
    assert_eq!(sl.segments[0].points, square());
    let pts: Vec<usize> = sl.corners.iter().map(|c| c.point).collect();
    assert_eq!(pts, vec![0, 1, 2, 3]);
    assert!(sl.caps.is_empty(), "closed segments have no caps");
}

#[test]
fn interior_corners_on_open_segment() {
    let style = EdgeStyle::new("bottom-right", AngleRange::new(-FRAC_PI_2, 0.0))
        .with_corner(CornerStyle::new(CornerKind::Convex, FRAC_PI_4))
        .with_corner(CornerStyle::new(CornerKind::Concave, FRAC_PI_4));
    let profile = Profile::with_edge_styles([style]);
    let out = layout_loop(&square(), &profile, &GeomCfg::default());
    let sl = &out.styles[0];
    assert_eq!(sl.segments.len(), 1);
    assert_eq!(
        sl.segments[0].points,
        vec![vector![0.0, 0.0], vector![10.0, 0.0], vector![10.0, 10.0]]
    );
    assert_eq!(sl.corners.len(), 1);
    let c = sl.corners[0];
    assert_eq!((c.segment, c.point, c.corner), (0, 1, 0));
    assert!((c.geometry.normal_angle + FRAC_PI_4).abs() < 1e-12);
}

#[test]
fn caps_follow_segment_direction() {
    let mut top = top_zone();
    top.caps = CapStyle {
        enabled: true,
        begin: Some(SpriteStyle::default()),
        end: None,
    };
    let profile = Profile::with_edge_styles([top]);
    let out = layout_loop(&square(), &profile, &GeomCfg::default());
    let caps = &out.styles[0].caps;
    assert_eq!(caps.len(), 1);
    assert_eq!(caps[0].end, CapEnd::Begin);
    assert_eq!(caps[0].position, vector![10.0, 10.0]);
    assert!((caps[0].direction.abs() - PI).abs() < 1e-12);

    let mut disabled_caps = top_zone();
    disabled_caps.caps.begin = Some(SpriteStyle::default());
    let profile = Profile::with_edge_styles([disabled_caps]);
    assert!(layout_loop(&square(), &profile, &GeomCfg::default()).styles[0].caps.is_empty());
}

#[test]
fn disabled_and_degenerate_inputs_are_empty() {
    let mut off = right_zone();
    off.disabled = true;
    let profile = Profile::with_edge_styles([off, top_zone()]);
    let out = layout_loop(&square(), &profile, &GeomCfg::default());
    assert!(out.styles[0].segments.is_empty());
    assert_eq!(out.styles[1].segments.len(), 1);

    for pts in [vec![], vec![vector![1.0, 1.0]]] {
        let out = layout_loop(&pts, &profile, &GeomCfg::default());
        assert_eq!(out.styles.len(), 2);
        assert_eq!(out.segment_count(), 0);
    }

    let all = layout(&[square(), vec![]], &profile, &GeomCfg::default());
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].segment_count(), 1);
    assert_eq!(all[1].segment_count(), 0);
}

#[test]
fn junctions_sit_where_applicable_segments_end() {
    let mut profile = Profile::with_edge_styles([right_zone(), top_zone()]);
    profile.attach_junction_style(JunctionStyle {
        corner: CornerStyle::new(CornerKind::Convex, FRAC_PI_4),
        edges: EdgeFilter::Named(vec!["top".into()]),
    });
    let out = layout_loop(&square(), &profile, &GeomCfg::default());
    let verts: Vec<usize> = out.junctions.iter().map(|j| j.vertex).collect();
    assert_eq!(verts, vec![2, 3]);
    assert!(out.junctions.iter().all(|j| j.junction == 0));

    // a sharper requirement wins where both apply
    profile.attach_junction_style(JunctionStyle {
        corner: CornerStyle::new(CornerKind::Convex, 80f64.to_radians()),
        edges: EdgeFilter::All,
    });
    let out = layout_loop(&square(), &profile, &GeomCfg::default());
    let picked: Vec<(usize, usize)> = out.junctions.iter().map(|j| (j.vertex, j.junction)).collect();
    assert_eq!(picked, vec![(1, 1), (2, 1), (3, 1)]);
}

#[test]
fn unresolvable_junction_names_place_nothing() {
    let mut profile = Profile::with_edge_styles([right_zone(), top_zone()]);
    profile.attach_junction_style(JunctionStyle {
        corner: CornerStyle::new(CornerKind::Convex, 0.0),
        edges: EdgeFilter::Named(vec!["gone".into()]),
    });
    let out = layout_loop(&square(), &profile, &GeomCfg::default());
    assert!(out.junctions.is_empty());
}
