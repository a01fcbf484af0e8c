//! Tests for reading region descriptors from PAGE XML

use crate::annotation::AnnotationReader;
use crate::config::Granularity;
use crate::coordinate::PolygonMode;
use crate::errors::SegError;

const PAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2019-07-15">
  <Page imageFilename="page.png" imageWidth="100" imageHeight="100">
    <TextRegion id="r1" type="paragraph" primaryLanguage="German" custom="readingOrder {index:0;}">
      <Coords points="10,10 90,10 90,40 10,40"/>
      <TextLine id="r1_l1">
        <Coords points="12,12 88,12 88,24 12,24"/>
        <TextEquiv><Unicode>first line</Unicode></TextEquiv>
      </TextLine>
      <TextLine id="r1_l2">
        <Coords points="12,26 88,26 88,38 12,38"/>
        <TextEquiv><Unicode>second line</Unicode></TextEquiv>
      </TextLine>
      <TextEquiv><Unicode>first line
second line</Unicode></TextEquiv>
    </TextRegion>
    <TextRegion id="r2">
      <Coords>
        <Point x="10" y="50"/>
        <Point x="90" y="50"/>
        <Point x="90" y="90"/>
        <Point x="10" y="90"/>
      </Coords>
      <TextEquiv><Unicode>legacy points</Unicode></TextEquiv>
    </TextRegion>
    <TextRegion id="r3">
      <Coords points="1,1 5,1 5,5"/>
    </TextRegion>
  </Page>
</PcGts>"#;

#[test]
fn test_read_regions_in_document_order() {
    let reader = AnnotationReader::new(Granularity::Region, PolygonMode::Strict);
    let set = reader.read_str(PAGE).unwrap();

    assert_eq!(set.candidates, 3);
    assert_eq!(set.skipped(), 1);
    assert_eq!(set.descriptors.len(), 2);

    let first = &set.descriptors[0];
    assert_eq!(first.index, 1);
    assert_eq!(first.id(), Some("r1"));
    assert_eq!(first.region_type(), Some("paragraph"));
    assert_eq!(first.language(), Some("German"));
    assert_eq!(first.polygon.to_string(), "(10,10)-(90,10)-(90,40)-(10,40)");
    assert_eq!(first.text, "first line\nsecond line");
    let keys: Vec<&str> = first.attributes.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["id", "type", "primaryLanguage", "custom"]);

    let second = &set.descriptors[1];
    assert_eq!(second.index, 2);
    assert_eq!(second.polygon.to_string(), "(10,50)-(90,50)-(90,90)-(10,90)");
    assert_eq!(second.text, "legacy points");
}

#[test]
fn test_read_lines() {
    let reader = AnnotationReader::new(Granularity::Line, PolygonMode::Strict);
    let set = reader.read_str(PAGE).unwrap();

    assert_eq!(set.candidates, 2);
    let ids: Vec<_> = set.descriptors.iter().map(|d| d.id().unwrap()).collect();
    assert_eq!(ids, vec!["r1_l1", "r1_l2"]);
    assert_eq!(set.descriptors[1].index, 2);
    assert_eq!(set.descriptors[1].text, "second line");
}

#[test]
fn test_skipped_regions_leave_index_gaps() {
    let xml = r#"<PcGts><Page>
        <TextRegion id="a"><Coords points="0,0 4,0 4,4"/></TextRegion>
        <TextRegion id="b"><Coords points="0,0 4,0 4,4"/><TextEquiv><Unicode>b</Unicode></TextEquiv></TextRegion>
    </Page></PcGts>"#;
    let set = AnnotationReader::default().read_str(xml).unwrap();
    assert_eq!(set.descriptors.len(), 1);
    assert_eq!(set.descriptors[0].index, 2);
}

#[test]
fn test_missing_polygon_is_skipped() {
    let xml = r#"<PcGts><Page>
        <TextRegion id="a"><TextEquiv><Unicode>no coords</Unicode></TextEquiv></TextRegion>
        <TextRegion id="b"><Coords/><TextEquiv><Unicode>empty coords</Unicode></TextEquiv></TextRegion>
        <TextRegion id="c"><Coords><Point x="1" y="1"/><Point x="2" y="2"/></Coords><TextEquiv><Unicode>two points</Unicode></TextEquiv></TextRegion>
    </Page></PcGts>"#;
    let set = AnnotationReader::default().read_str(xml).unwrap();
    assert_eq!(set.candidates, 3);
    assert!(set.descriptors.is_empty());
}

#[test]
fn test_malformed_points_attribute_is_fatal() {
    let xml = r#"<PcGts><Page>
        <TextRegion id="a"><Coords points="1,2 3,4 a,b"/><TextEquiv><Unicode>x</Unicode></TextEquiv></TextRegion>
    </Page></PcGts>"#;
    let result = AnnotationReader::default().read_str(xml);
    assert!(matches!(result, Err(SegError::Format(_))));
}

#[test]
fn test_malformed_point_node_is_fatal() {
    let xml = r#"<PcGts><Page>
        <TextRegion id="a"><Coords><Point x="1" y="1"/><Point x="2" y="z"/><Point x="3" y="3"/></Coords>
        <TextEquiv><Unicode>x</Unicode></TextEquiv></TextRegion>
    </Page></PcGts>"#;
    let result = AnnotationReader::default().read_str(xml);
    assert!(matches!(result, Err(SegError::Format(_))));
}

#[test]
fn test_two_point_rectangle_mode() {
    let xml = r#"<PcGts><Page>
        <TextRegion id="a"><Coords points="1,2 5,6"/><TextEquiv><Unicode>x</Unicode></TextEquiv></TextRegion>
    </Page></PcGts>"#;
    assert!(matches!(AnnotationReader::default().read_str(xml), Err(SegError::Format(_))));

    let reader = AnnotationReader::new(Granularity::Region, PolygonMode::TwoPointRectangle);
    let set = reader.read_str(xml).unwrap();
    assert_eq!(set.descriptors[0].polygon.to_string(), "(1,2)-(5,2)-(5,6)-(1,6)");
}

#[test]
fn test_unicode_tag_is_case_insensitive() {
    let xml = r#"<PcGts><Page>
        <TextRegion id="a"><Coords points="0,0 4,0 4,4"/><TextEquiv><unicode>lower</unicode></TextEquiv></TextRegion>
    </Page></PcGts>"#;
    let set = AnnotationReader::default().read_str(xml).unwrap();
    assert_eq!(set.descriptors[0].text, "lower");
}

#[test]
fn test_invalid_xml() {
    let result = AnnotationReader::default().read_str("<PcGts><Page>");
    assert!(matches!(result, Err(SegError::Xml { .. })));
}
