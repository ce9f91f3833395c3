//! Append-only SVG document builder.
//!
//! Primitives are serialized in emission order, so later calls draw on top of earlier ones.
//! Nested `<g>` and `<defs>` scopes live on an explicit stack: [`SvgBuilder::group`] and
//! [`SvgBuilder::defs`] open a scope, [`SvgBuilder::end`] closes the innermost one and appends it
//! to its parent.

use std::fmt::Write as _;

use crate::foundation::{
    core::Rgba8,
    error::{CardError, CardResult},
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RectAttrs {
    pub fill: Option<Rgba8>,
    pub stroke: Option<Rgba8>,
    pub stroke_width: Option<f64>,
    pub opacity: Option<f64>,
}

impl RectAttrs {
    pub fn filled(fill: Rgba8) -> Self {
        Self {
            fill: Some(fill),
            ..Self::default()
        }
    }

    pub fn stroked(stroke: Rgba8, width: f64) -> Self {
        Self {
            stroke: Some(stroke),
            stroke_width: Some(width),
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextAttrs {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: FontWeight,
    pub fill: Option<Rgba8>,
    pub anchor: TextAnchor,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EllipseAttrs {
    pub fill: Option<Rgba8>,
    pub stroke: Option<Rgba8>,
    pub stroke_width: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineAttrs {
    pub stroke: Option<Rgba8>,
    pub stroke_width: Option<f64>,
    pub opacity: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupAttrs {
    pub opacity: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba8,
    /// Overrides the color's own alpha.
    pub opacity: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
enum Element {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        attrs: RectAttrs,
    },
    Text {
        content: String,
        x: f64,
        y: f64,
        attrs: TextAttrs,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        attrs: EllipseAttrs,
    },
    Image {
        href: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        attrs: LineAttrs,
    },
    Group {
        attrs: GroupAttrs,
        children: Vec<Element>,
    },
    Defs {
        children: Vec<Element>,
    },
    RadialGradient {
        id: String,
        stops: Vec<GradientStop>,
    },
}

#[derive(Debug)]
enum ScopeKind {
    Group(GroupAttrs),
    Defs,
}

#[derive(Debug)]
struct Scope {
    kind: ScopeKind,
    elements: Vec<Element>,
}

#[derive(Debug)]
pub struct SvgBuilder {
    width: f64,
    height: f64,
    root: Vec<Element>,
    open: Vec<Scope>,
}

impl SvgBuilder {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            root: Vec::new(),
            open: Vec::new(),
        }
    }

    fn push(&mut self, el: Element) -> &mut Self {
        match self.open.last_mut() {
            Some(scope) => scope.elements.push(el),
            None => self.root.push(el),
        }
        self
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, attrs: RectAttrs) -> &mut Self {
        self.push(Element::Rect {
            x,
            y,
            width,
            height,
            attrs,
        })
    }

    pub fn text(
        &mut self,
        content: impl Into<String>,
        x: f64,
        y: f64,
        attrs: TextAttrs,
    ) -> &mut Self {
        self.push(Element::Text {
            content: content.into(),
            x,
            y,
            attrs,
        })
    }

    pub fn ellipse(
        &mut self,
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        attrs: EllipseAttrs,
    ) -> &mut Self {
        self.push(Element::Ellipse {
            cx,
            cy,
            rx,
            ry,
            attrs,
        })
    }

    pub fn image(
        &mut self,
        href: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> &mut Self {
        self.push(Element::Image {
            href: href.into(),
            x,
            y,
            width,
            height,
        })
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, attrs: LineAttrs) -> &mut Self {
        self.push(Element::Line {
            x1,
            y1,
            x2,
            y2,
            attrs,
        })
    }

    pub fn radial_gradient(
        &mut self,
        id: impl Into<String>,
        stops: Vec<GradientStop>,
    ) -> &mut Self {
        self.push(Element::RadialGradient {
            id: id.into(),
            stops,
        })
    }

    /// Open a `<g>` scope. Close it with [`Self::end`].
    pub fn group(&mut self, attrs: GroupAttrs) -> &mut Self {
        self.open.push(Scope {
            kind: ScopeKind::Group(attrs),
            elements: Vec::new(),
        });
        self
    }

    /// Open a `<defs>` scope. Close it with [`Self::end`].
    pub fn defs(&mut self) -> &mut Self {
        self.open.push(Scope {
            kind: ScopeKind::Defs,
            elements: Vec::new(),
        });
        self
    }

    /// Close the innermost open scope.
    pub fn end(&mut self) -> CardResult<&mut Self> {
        let scope = self
            .open
            .pop()
            .ok_or_else(|| CardError::builder("end() called with no open group or defs"))?;
        let el = match scope.kind {
            ScopeKind::Group(attrs) => Element::Group {
                attrs,
                children: scope.elements,
            },
            ScopeKind::Defs => Element::Defs {
                children: scope.elements,
            },
        };
        Ok(self.push(el))
    }

    /// Serialize the document. Every opened scope must have been closed.
    pub fn finish(&self) -> CardResult<String> {
        if !self.open.is_empty() {
            return Err(CardError::builder(format!(
                "{} group/defs scope(s) left open",
                self.open.len()
            )));
        }

        let mut s = String::with_capacity(256 + self.root.len() * 96);
        let _ = write!(
            s,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
            Num(self.width),
            Num(self.height)
        );
        for el in &self.root {
            write_element(&mut s, el);
        }
        s.push_str("</svg>");
        Ok(s)
    }
}

/// Number formatting for attributes: shortest round-trip form, no negative zero.
struct Num(f64);

impl std::fmt::Display for Num {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0.0 {
            f.write_str("0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn write_paint(s: &mut String, name: &str, color: Rgba8) {
    let _ = write!(s, r#" {name}="rgb({},{},{})""#, color.r, color.g, color.b);
    if !color.is_opaque() {
        let _ = write!(s, r#" {name}-opacity="{}""#, Num(color.opacity()));
    }
}

fn write_opt(s: &mut String, name: &str, v: Option<f64>) {
    if let Some(v) = v {
        let _ = write!(s, r#" {name}="{}""#, Num(v));
    }
}

fn write_element(s: &mut String, el: &Element) {
    match el {
        Element::Rect {
            x,
            y,
            width,
            height,
            attrs,
        } => {
            let _ = write!(
                s,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                Num(*x),
                Num(*y),
                Num(*width),
                Num(*height)
            );
            match attrs.fill {
                Some(fill) => write_paint(s, "fill", fill),
                None => s.push_str(r#" fill="none""#),
            }
            if let Some(stroke) = attrs.stroke {
                write_paint(s, "stroke", stroke);
            }
            write_opt(s, "stroke-width", attrs.stroke_width);
            write_opt(s, "opacity", attrs.opacity);
            s.push_str("/>");
        }
        Element::Text {
            content,
            x,
            y,
            attrs,
        } => {
            let _ = write!(s, r#"<text x="{}" y="{}""#, Num(*x), Num(*y));
            if let Some(family) = &attrs.font_family {
                let _ = write!(s, r#" font-family="{}""#, escape_xml(family));
            }
            write_opt(s, "font-size", attrs.font_size);
            if attrs.font_weight == FontWeight::Bold {
                s.push_str(r#" font-weight="bold""#);
            }
            if let Some(fill) = attrs.fill {
                write_paint(s, "fill", fill);
            }
            if attrs.anchor != TextAnchor::Start {
                let _ = write!(s, r#" text-anchor="{}""#, attrs.anchor.as_str());
            }
            let _ = write!(s, ">{}</text>", escape_xml(content));
        }
        Element::Ellipse {
            cx,
            cy,
            rx,
            ry,
            attrs,
        } => {
            let _ = write!(
                s,
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}""#,
                Num(*cx),
                Num(*cy),
                Num(*rx),
                Num(*ry)
            );
            match attrs.fill {
                Some(fill) => write_paint(s, "fill", fill),
                None => s.push_str(r#" fill="none""#),
            }
            if let Some(stroke) = attrs.stroke {
                write_paint(s, "stroke", stroke);
            }
            write_opt(s, "stroke-width", attrs.stroke_width);
            s.push_str("/>");
        }
        Element::Image {
            href,
            x,
            y,
            width,
            height,
        } => {
            let _ = write!(
                s,
                r#"<image href="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
                escape_xml(href),
                Num(*x),
                Num(*y),
                Num(*width),
                Num(*height)
            );
        }
        Element::Line {
            x1,
            y1,
            x2,
            y2,
            attrs,
        } => {
            let _ = write!(
                s,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                Num(*x1),
                Num(*y1),
                Num(*x2),
                Num(*y2)
            );
            if let Some(stroke) = attrs.stroke {
                write_paint(s, "stroke", stroke);
            }
            write_opt(s, "stroke-width", attrs.stroke_width);
            write_opt(s, "opacity", attrs.opacity);
            s.push_str("/>");
        }
        Element::Group { attrs, children } => {
            s.push_str("<g");
            write_opt(s, "opacity", attrs.opacity);
            s.push('>');
            for child in children {
                write_element(s, child);
            }
            s.push_str("</g>");
        }
        Element::Defs { children } => {
            s.push_str("<defs>");
            for child in children {
                write_element(s, child);
            }
            s.push_str("</defs>");
        }
        Element::RadialGradient { id, stops } => {
            let _ = write!(s, r#"<radialGradient id="{}">"#, escape_xml(id));
            for stop in stops {
                let _ = write!(
                    s,
                    r#"<stop offset="{}" stop-color="rgb({},{},{})""#,
                    Num(stop.offset),
                    stop.color.r,
                    stop.color.g,
                    stop.color.b
                );
                let op = stop.opacity.unwrap_or_else(|| stop.color.opacity());
                if op < 1.0 {
                    let _ = write!(s, r#" stop-opacity="{}""#, Num(op));
                }
                s.push_str("/>");
            }
            s.push_str("</radialGradient>");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEAD: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="20">"#;

    fn body(svg: &str) -> &str {
        svg.strip_prefix(HEAD)
            .and_then(|s| s.strip_suffix("</svg>"))
            .unwrap()
    }

    #[test]
    fn empty_document() {
        let svg = SvgBuilder::new(10.0, 20.0).finish().unwrap();
        assert_eq!(svg, format!("{HEAD}</svg>"));
    }

    #[test]
    fn rect_fill_alpha_is_separate_opacity() {
        let mut b = SvgBuilder::new(10.0, 20.0);
        b.rect(1.0, 2.0, 3.5, 4.0, RectAttrs::filled(Rgba8::new(10, 20, 30, 51)));
        let svg = b.finish().unwrap();
        assert_eq!(
            body(&svg),
            r#"<rect x="1" y="2" width="3.5" height="4" fill="rgb(10,20,30)" fill-opacity="0.2"/>"#
        );
    }

    #[test]
    fn stroked_rect_has_no_fill() {
        let mut b = SvgBuilder::new(10.0, 20.0);
        b.rect(0.5, 0.5, 9.0, 19.0, RectAttrs::stroked(Rgba8::BLACK, 1.0));
        let svg = b.finish().unwrap();
        assert_eq!(
            body(&svg),
            r#"<rect x="0.5" y="0.5" width="9" height="19" fill="none" stroke="rgb(0,0,0)" stroke-width="1"/>"#
        );
    }

    #[test]
    fn text_escapes_and_emits_non_default_anchor_and_weight() {
        let mut b = SvgBuilder::new(10.0, 20.0);
        b.text(
            "a<b & \"c\"",
            5.0,
            6.0,
            TextAttrs {
                font_family: Some("Liberation Sans".to_string()),
                font_size: Some(10.0),
                font_weight: FontWeight::Bold,
                fill: Some(Rgba8::WHITE),
                anchor: TextAnchor::End,
            },
        );
        b.text("plain", 1.0, 2.0, TextAttrs::default());
        let svg = b.finish().unwrap();
        assert_eq!(
            body(&svg),
            concat!(
                r#"<text x="5" y="6" font-family="Liberation Sans" font-size="10" font-weight="bold" fill="rgb(255,255,255)" text-anchor="end">a&lt;b &amp; &quot;c&quot;</text>"#,
                r#"<text x="1" y="2">plain</text>"#
            )
        );
    }

    #[test]
    fn ellipse_line_and_image() {
        let mut b = SvgBuilder::new(10.0, 20.0);
        b.ellipse(
            3.0,
            3.0,
            2.5,
            2.5,
            EllipseAttrs {
                stroke: Some(Rgba8::BLACK),
                stroke_width: Some(1.0),
                ..EllipseAttrs::default()
            },
        )
        .line(
            0.0,
            1.0,
            10.0,
            1.0,
            LineAttrs {
                stroke: Some(Rgba8::BLACK.with_alpha(50)),
                stroke_width: Some(1.0),
                opacity: None,
            },
        )
        .image("a.png", 1.0, 2.0, 3.0, 4.0);
        let svg = b.finish().unwrap();
        assert_eq!(
            body(&svg),
            concat!(
                r#"<ellipse cx="3" cy="3" rx="2.5" ry="2.5" fill="none" stroke="rgb(0,0,0)" stroke-width="1"/>"#,
                r#"<line x1="0" y1="1" x2="10" y2="1" stroke="rgb(0,0,0)" stroke-opacity="0.19607843137254902" stroke-width="1"/>"#,
                r#"<image href="a.png" x="1" y="2" width="3" height="4"/>"#
            )
        );
    }

    #[test]
    fn nested_scopes_keep_emission_order() {
        let mut b = SvgBuilder::new(10.0, 20.0);
        b.rect(0.0, 0.0, 1.0, 1.0, RectAttrs::default());
        b.defs().radial_gradient(
            "glow",
            vec![
                GradientStop {
                    offset: 0.0,
                    color: Rgba8::WHITE,
                    opacity: None,
                },
                GradientStop {
                    offset: 1.0,
                    color: Rgba8::WHITE,
                    opacity: Some(0.0),
                },
            ],
        );
        b.end().unwrap();
        b.group(GroupAttrs { opacity: Some(0.5) })
            .group(GroupAttrs::default())
            .line(0.0, 0.0, 1.0, 1.0, LineAttrs::default());
        b.end().unwrap().end().unwrap();
        b.rect(2.0, 2.0, 1.0, 1.0, RectAttrs::default());

        let svg = b.finish().unwrap();
        assert_eq!(
            body(&svg),
            concat!(
                r#"<rect x="0" y="0" width="1" height="1" fill="none"/>"#,
                r#"<defs><radialGradient id="glow"><stop offset="0" stop-color="rgb(255,255,255)"/><stop offset="1" stop-color="rgb(255,255,255)" stop-opacity="0"/></radialGradient></defs>"#,
                r#"<g opacity="0.5"><g><line x1="0" y1="0" x2="1" y2="1"/></g></g>"#,
                r#"<rect x="2" y="2" width="1" height="1" fill="none"/>"#
            )
        );
    }

    #[test]
    fn end_on_root_fails() {
        let mut b = SvgBuilder::new(10.0, 20.0);
        let err = b.end().unwrap_err();
        assert!(matches!(err, CardError::Builder(_)));
    }

    #[test]
    fn finish_with_open_scope_fails() {
        let mut b = SvgBuilder::new(10.0, 20.0);
        b.group(GroupAttrs::default());
        assert!(matches!(b.finish(), Err(CardError::Builder(_))));
        b.end().unwrap();
        assert!(b.finish().is_ok());
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        let mut b = SvgBuilder::new(10.0, 20.0);
        b.line(-0.0, 0.0, 1.0, -1.5, LineAttrs::default());
        let svg = b.finish().unwrap();
        assert_eq!(body(&svg), r#"<line x1="0" y1="0" x2="1" y2="-1.5"/>"#);
    }
}
