//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

pub const PAGE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2019-07-15">
  <Page imageFilename="page.png" imageWidth="120" imageHeight="100">
    <TextRegion id="r1" type="paragraph" primaryLanguage="German">
      <Coords points="10,10 110,10 110,40 10,40"/>
      <TextLine id="r1_l1">
        <Coords points="12,12 108,12 108,24 12,24"/>
        <TextEquiv><Unicode>first line</Unicode></TextEquiv>
      </TextLine>
      <TextLine id="r1_l2">
        <Coords points="12,26 108,27 104,38 14,37"/>
        <TextEquiv><Unicode>second line</Unicode></TextEquiv>
      </TextLine>
      <TextEquiv><Unicode>first line
second line</Unicode></TextEquiv>
    </TextRegion>
    <TextRegion id="r2" type="heading">
      <Coords>
        <Point x="10" y="50"/>
        <Point x="90" y="50"/>
        <Point x="10" y="90"/>
      </Coords>
      <TextLine id="r2_l1">
        <Coords points="12,52 80,52 14,70"/>
        <TextEquiv><Unicode>slanted</Unicode></TextEquiv>
      </TextLine>
      <TextEquiv><Unicode>slanted</Unicode></TextEquiv>
    </TextRegion>
    <TextRegion id="r3">
      <Coords points="95,50 115,50 115,90 95,90"/>
    </TextRegion>
  </Page>
</PcGts>"#;

pub const MALFORMED_XML: &str = r#"<PcGts>
  <Page>
    <TextRegion id="r1">
      <Coords points="10,10 90,x 90,40"/>
      <TextEquiv><Unicode>bad</Unicode></TextEquiv>
    </TextRegion>
  </Page>
</PcGts>"#;

/// Colour of source pixel `(x, y)`
pub fn source_pixel(x: u32, y: u32) -> Rgba<u8> {
    Rgba([(x * 2) as u8, (y * 2) as u8, ((x + y) % 200) as u8, 255])
}

/// Write the page image and an annotation into `dir`
pub fn write_fixture(dir: &Path, xml: &str) -> (PathBuf, PathBuf) {
    let image_path = dir.join("page.png");
    RgbaImage::from_fn(120, 100, source_pixel).save(&image_path).unwrap();

    let xml_path = dir.join("page.xml");
    fs::write(&xml_path, xml).unwrap();
    (xml_path, image_path)
}

/// Names and contents of all files in a directory, sorted by name
pub fn directory_contents(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files: Vec<(String, Vec<u8>)> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| {
            let path = entry.unwrap().path();
            (path.file_name().unwrap().to_string_lossy().into_owned(), fs::read(&path).unwrap())
        })
        .collect();
    files.sort();
    files
}
