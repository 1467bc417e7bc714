use std::collections::HashMap;

use futures::executor::block_on;
use futures::future::{ready, FutureExt, LocalBoxFuture};

use kanji_strokes::glyph::fetcher::{FetchError, GlyphSource};
use kanji_strokes::glyph::key::GlyphKey;
use kanji_strokes::glyph::types::Point;
use kanji_strokes::glyph::{load_strokes, parse_glyph, ParseOptions};
use kanji_strokes::path::interpreter::{interpret, CURVE_SAMPLES};
use kanji_strokes::path::length::{estimate_length, GeometricLength};
use kanji_strokes::path::policy::ParsePolicy;

struct Shelf(HashMap<String, String>);

impl GlyphSource for Shelf {
    fn read<'a>(&'a self, key: &'a GlyphKey) -> LocalBoxFuture<'a, Result<String, FetchError>> {
        let result = self
            .0
            .get(key.as_str())
            .cloned()
            .ok_or(FetchError::NotFound { status: 404 });
        ready(result).boxed_local()
    }
}

const DOCUMENT_ORDER_2_1_3: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.0//EN" "http://www.w3.org/TR/2001/REC-SVG-20010904/DTD/svg10.dtd" [
<!ATTLIST g
xmlns:kvg CDATA #FIXED "http://kanjivg.tagaini.net"
kvg:element CDATA #IMPLIED >
<!ATTLIST path
xmlns:kvg CDATA #FIXED "http://kanjivg.tagaini.net"
kvg:type CDATA #IMPLIED >
]>
<svg xmlns="http://www.w3.org/2000/svg" width="109" height="109" viewBox="0 0 109 109">
<g id="kvg:StrokePaths_05ddd" style="fill:none;stroke:#000000;stroke-width:3;">
<g id="kvg:05ddd" kvg:element="川">
	<path id="kvg:05ddd-s2" kvg:type="㇑" d="M54.5,20 L54.5,80"/>
	<path id="kvg:05ddd-s1" kvg:type="㇒" d="M21.8,20 L21.8,90"/>
	<path id="kvg:05ddd-s3" kvg:type="㇑" d="M87.2,10 V100"/>
</g>
</g>
</svg>
"#;

fn assert_near(actual: Point, expected: Point) {
    assert!(
        (actual.x - expected.x).abs() < 1e-12 && (actual.y - expected.y).abs() < 1e-12,
        "{:?} is not {:?}",
        actual,
        expected
    );
}

#[test]
fn strokes_follow_writing_order_not_document_order() {
    let strokes = parse_glyph(DOCUMENT_ORDER_2_1_3, &ParseOptions::default()).unwrap();
    assert_eq!(strokes.len(), 3);
    assert_near(strokes[0][0], Point::new(0.2, 20.0 / 109.0));
    assert_near(strokes[1][0], Point::new(0.5, 20.0 / 109.0));
    assert_near(strokes[2][1], Point::new(0.8, 100.0 / 109.0));
}

#[test]
fn load_through_source() {
    let mut shelf = HashMap::new();
    shelf.insert("05ddd".to_string(), DOCUMENT_ORDER_2_1_3.to_string());
    let shelf = Shelf(shelf);

    let strokes = block_on(load_strokes(&shelf, '川', &ParseOptions::default()));
    assert_eq!(strokes.map(|s| s.len()), Some(3));
    assert!(block_on(load_strokes(&shelf, '山', &ParseOptions::default())).is_none());
}

#[test]
fn curve_endpoints_match_cursor_and_target() {
    let points = interpret("M10,10 C20,0 30,0 40,10", ParsePolicy::Lenient).unwrap();
    assert_eq!(points.len(), 1 + CURVE_SAMPLES);
    assert_eq!(points[1], Point::new(10.0, 10.0));
    assert_eq!(points[CURVE_SAMPLES], Point::new(40.0, 10.0));
}

#[test]
fn length_of_stroke() {
    assert_eq!(estimate_length(Some("M54.5,20 L54.5,80"), &GeometricLength), 60.0);
    assert_eq!(estimate_length(None, &GeometricLength), 0.0);
}
