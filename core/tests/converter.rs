//! Behavioral properties of `XmlConverter` that hold for any target type.

use std::io::{self, Read};
use std::sync::Arc;
use std::thread;

use serde::{Deserialize, Serialize};
use xml_converter::{
    ConversionError, Converter, QuickXmlSerializer, ResponseBody, XmlConverter, XmlSerializer, APPLICATION_XML_UTF8,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "point")]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "route")]
struct Route {
    name: String,
    #[serde(rename = "point", default)]
    points: Vec<Point>,
}

/// Serializer that counts strict reads, delegating the XML work.
#[derive(Default)]
struct Recording {
    inner: QuickXmlSerializer,
    strict_reads: std::sync::atomic::AtomicUsize,
}

impl XmlSerializer for Recording {
    fn read<T, R>(&self, input: R, strict: bool) -> Result<T, ConversionError>
    where
        T: serde::de::DeserializeOwned,
        R: Read,
    {
        if strict {
            self.strict_reads.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }
        self.inner.read(input, strict)
    }

    fn write<T>(&self, value: &T, sink: &mut Vec<u8>) -> Result<(), ConversionError>
    where
        T: Serialize + ?Sized,
    {
        self.inner.write(value, sink)
    }
}

/// Reader that fails after yielding a prefix.
struct BrokenPipe {
    prefix: io::Cursor<&'static str>,
}

impl Read for BrokenPipe {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.prefix.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away")),
            n => Ok(n),
        }
    }
}

#[test]
fn point_example_both_directions() {
    let converter = XmlConverter::new();

    let point: Point = converter
        .decode(ResponseBody::from_bytes("<point><x>3</x><y>4</y></point>"))
        .unwrap();
    assert_eq!(point, Point { x: 3, y: 4 });

    let body = converter.encode(&point).unwrap();
    assert_eq!(body.content_type(), APPLICATION_XML_UTF8);
    assert_eq!(body.bytes(), b"<point><x>3</x><y>4</y></point>");
}

#[test]
fn nested_values_round_trip() {
    let converter = XmlConverter::new();
    let route = Route {
        name: "coast & hills".to_string(),
        points: vec![Point { x: 0, y: 0 }, Point { x: 5, y: -2 }, Point { x: 9, y: 1 }],
    };

    let body = converter.encode(&route).unwrap();
    let back: Route = converter.decode(ResponseBody::from_bytes(body.into_bytes())).unwrap();
    assert_eq!(back, route);
}

#[test]
fn unicode_text_round_trips_as_utf8() {
    let converter = XmlConverter::new();
    let route = Route {
        name: "Zürich → Kraków".to_string(),
        points: Vec::new(),
    };

    let body = converter.encode(&route).unwrap();
    assert!(std::str::from_utf8(body.bytes()).unwrap().contains("Zürich → Kraków"));
    let back: Route = converter.decode(ResponseBody::from_bytes(body.into_bytes())).unwrap();
    assert_eq!(back, route);
}

#[test]
fn media_type_is_fixed() {
    let converter = XmlConverter::with_strict(false);
    assert_eq!(converter.media_type(), "application/xml; charset=UTF-8");
    assert_eq!(
        converter.encode(&Point { x: 1, y: 1 }).unwrap().content_type(),
        "application/xml; charset=UTF-8"
    );
    assert_eq!(
        converter.encode(&Route { name: "r".to_string(), points: Vec::new() }).unwrap().content_type(),
        "application/xml; charset=UTF-8"
    );
}

#[test]
fn strict_flag_reaches_the_serializer() {
    let converter = XmlConverter::with_serializer(Recording::default());
    let _: Point = converter
        .decode(ResponseBody::from_bytes("<point><x>1</x><y>2</y></point>"))
        .unwrap();
    let _: Point = converter
        .decode(ResponseBody::from_bytes("<point><x>1</x><y>2</y></point>"))
        .unwrap();
    assert_eq!(
        converter.serializer().strict_reads.load(std::sync::atomic::Ordering::SeqCst),
        2
    );

    let lenient = XmlConverter::from_parts(Recording::default(), false);
    let _: Point = lenient
        .decode(ResponseBody::from_bytes("<point><x>1</x><y>2</y></point>"))
        .unwrap();
    assert_eq!(lenient.serializer().strict_reads.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[test]
fn stream_failure_surfaces_as_io() {
    let body = ResponseBody::from_reader(BrokenPipe {
        prefix: io::Cursor::new("<point><x>3</x>"),
    });
    let err = XmlConverter::new().decode::<Point>(body).unwrap_err();
    match err {
        ConversionError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn unserializable_value_is_an_error_not_a_panic() {
    // A bare sequence has no element name to write.
    let err = XmlConverter::new().encode(&vec![1, 2, 3]).unwrap_err();
    assert!(matches!(err, ConversionError::Serialize(_)), "got {err:?}");
}

#[test]
fn concurrent_decodes_do_not_interfere() {
    let converter = Arc::new(XmlConverter::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let converter = Arc::clone(&converter);
            thread::spawn(move || {
                (0..50)
                    .map(|j| {
                        let xml = format!("<point><x>{i}</x><y>{j}</y></point>");
                        let point: Point = converter.decode(ResponseBody::from_bytes(xml)).unwrap();
                        assert_eq!(point, Point { x: i, y: j });
                    })
                    .count()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 50);
    }
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename = "user")]
struct User {
    #[serde(alias = "fullName")]
    name: String,
}

/// Written out without its token; only ever read.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename = "session")]
struct Session {
    user: String,
    #[serde(skip_serializing, default)]
    token: Option<String>,
}

#[test]
fn strict_accepts_aliased_field() {
    let user: User = XmlConverter::new()
        .decode(ResponseBody::from_bytes("<user><fullName>Ada</fullName></user>"))
        .unwrap();
    assert_eq!(user, User { name: "Ada".to_string() });
}

#[test]
fn strict_accepts_field_skipped_on_write() {
    let session: Session = XmlConverter::new()
        .decode(ResponseBody::from_bytes("<session><user>ada</user><token>abc</token></session>"))
        .unwrap();
    assert_eq!(session.token.as_deref(), Some("abc"));
    assert_eq!(
        XmlConverter::new().encode(&session).unwrap().bytes(),
        b"<session><user>ada</user></session>"
    );
}

#[test]
fn strict_accepts_prefixed_and_schema_instance_markup() {
    let xml = concat!(
        r#"<g:point xmlns:g="urn:geo" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
        r#"xsi:schemaLocation="urn:geo geo.xsd"><g:x>3</g:x><g:y>4</g:y></g:point>"#
    );
    let point: Point = XmlConverter::new().decode(ResponseBody::from_bytes(xml)).unwrap();
    assert_eq!(point, Point { x: 3, y: 4 });
}

#[test]
fn content_after_root_is_syntax_in_both_modes() {
    for strict in [true, false] {
        let body = ResponseBody::from_bytes("<point><x>3</x><y>4</y></point><extra/>");
        let err = XmlConverter::with_strict(strict).decode::<Point>(body).unwrap_err();
        assert!(matches!(err, ConversionError::Syntax(_)), "strict={strict}: got {err:?}");
    }
}
