use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
};

use ab_glyph::{Font, FontArc, FontVec, GlyphId, PxScale, ScaleFont, point};
use image::RgbImage;

use crate::{
    config::{FontRole, PosterConfig},
    foundation::{
        core::Rgb8,
        error::{PosterError, PosterResult},
    },
    render::composite::{blend_pixel, coverage_to_alpha},
    text::painter::{TextBounds, TextPainter},
};

/// Where a loaded face came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FaceOrigin {
    /// The configured font file.
    File(PathBuf),
    /// System database fallback, identified by family name.
    System(String),
    /// The face bundled with the crate.
    BuiltIn,
}

impl fmt::Display for FaceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(p) => write!(f, "{}", p.display()),
            Self::System(family) => write!(f, "system fallback '{family}'"),
            Self::BuiltIn => f.write_str("built-in DejaVu Sans Bold"),
        }
    }
}

#[derive(Clone)]
struct LoadedFace {
    font: FontArc,
    scale: PxScale,
    origin: FaceOrigin,
}

/// Immutable table of the six poster faces, built once at startup.
#[derive(Clone)]
pub struct FontTable {
    faces: HashMap<FontRole, LoadedFace>,
}

impl fmt::Debug for FontTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("FontTable");
        for role in FontRole::ALL {
            if let Some(face) = self.faces.get(&role) {
                d.field(role.as_str(), &format_args!("{} @ {}px", face.origin, face.scale.y));
            }
        }
        d.finish()
    }
}

impl FontTable {
    /// Load every role from `config`.
    ///
    /// An unusable file falls back to a system face (when `config.system_fonts` is set) and then
    /// to the bundled face, so only an invalid config makes this fail.
    pub fn load(config: &PosterConfig) -> PosterResult<Self> {
        config.validate()?;
        let mut system = if config.system_fonts {
            SystemFonts::lazy(config.font_dir.clone())
        } else {
            SystemFonts::empty()
        };
        Self::load_with(config, &mut system)
    }

    fn load_with(config: &PosterConfig, system: &mut SystemFonts) -> PosterResult<Self> {
        let mut by_path = HashMap::<PathBuf, FontArc>::new();
        let mut faces = HashMap::new();

        for role in FontRole::ALL {
            let spec = config.fonts.spec(role);
            let path = config.font_path(role);

            let cached = by_path.get(&path).cloned();
            let from_file = match cached {
                Some(font) => Some(font),
                None => match read_font_file(&path) {
                    Ok(font) => {
                        by_path.insert(path.clone(), font.clone());
                        Some(font)
                    }
                    Err(err) => {
                        tracing::warn!(
                            role = role.as_str(),
                            path = %path.display(),
                            %err,
                            "font file unusable; falling back"
                        );
                        None
                    }
                },
            };

            let (font, origin) = match from_file {
                Some(font) => (font, FaceOrigin::File(path)),
                None => match system.resolve(role) {
                    Some((font, family)) => (font, FaceOrigin::System(family)),
                    None => (builtin_face()?, FaceOrigin::BuiltIn),
                },
            };

            faces.insert(
                role,
                LoadedFace {
                    font,
                    scale: PxScale::from(spec.size_px),
                    origin,
                },
            );
        }

        Ok(Self { faces })
    }

    /// Source of the face bound to `role`.
    pub fn origin(&self, role: FontRole) -> Option<&FaceOrigin> {
        self.faces.get(&role).map(|f| &f.origin)
    }

    fn face(&self, role: FontRole) -> &LoadedFace {
        // `load_with` inserts every role in `FontRole::ALL`.
        &self.faces[&role]
    }
}

impl TextPainter for FontTable {
    fn measure(&self, role: FontRole, text: &str) -> TextBounds {
        let face = self.face(role);
        let mut bounds: Option<ab_glyph::Rect> = None;
        let caret = for_each_glyph(face, text, 0.0, 0.0, |outlined| {
            let b = outlined.px_bounds();
            bounds = Some(match bounds {
                None => b,
                Some(acc) => ab_glyph::Rect {
                    min: point(acc.min.x.min(b.min.x), acc.min.y.min(b.min.y)),
                    max: point(acc.max.x.max(b.max.x), acc.max.y.max(b.max.y)),
                },
            });
        });

        match bounds {
            Some(b) => TextBounds {
                left: b.min.x.floor() as i32,
                top: b.min.y.floor() as i32,
                right: b.max.x.ceil() as i32,
                bottom: b.max.y.ceil() as i32,
            },
            // whitespace-only: advance width, no ink
            None => TextBounds {
                left: 0,
                top: 0,
                right: caret.ceil() as i32,
                bottom: 0,
            },
        }
    }

    fn draw(&self, canvas: &mut RgbImage, role: FontRole, x: i32, y: i32, color: Rgb8, text: &str) {
        let face = self.face(role);
        for_each_glyph(face, text, x as f32, y as f32, |outlined| {
            let b = outlined.px_bounds();
            let (ox, oy) = (b.min.x as i64, b.min.y as i64);
            outlined.draw(|gx, gy, coverage| {
                let alpha = coverage_to_alpha(coverage);
                if alpha > 0 {
                    blend_pixel(
                        canvas,
                        ox + i64::from(gx),
                        oy + i64::from(gy),
                        color,
                        alpha,
                    );
                }
            });
        });
    }
}

/// Lay out `text` on one line with the ascent at `y`, calling `f` for every inked glyph.
/// Returns the final caret x relative to `x`.
fn for_each_glyph(
    face: &LoadedFace,
    text: &str,
    x: f32,
    y: f32,
    mut f: impl FnMut(ab_glyph::OutlinedGlyph),
) -> f32 {
    let scaled = face.font.as_scaled(face.scale);
    let baseline = y + scaled.ascent();
    let mut caret = 0.0f32;
    let mut prev: Option<GlyphId> = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(p) = prev {
            caret += scaled.kern(p, id);
        }
        let glyph = id.with_scale_and_position(face.scale, point(x + caret, baseline));
        caret += scaled.h_advance(id);
        prev = Some(id);
        if let Some(outlined) = face.font.outline_glyph(glyph) {
            f(outlined);
        }
    }
    caret
}

fn read_font_file(path: &Path) -> anyhow::Result<FontArc> {
    use anyhow::Context as _;

    let bytes = std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
    FontArc::try_from_vec(bytes).with_context(|| format!("parse font '{}'", path.display()))
}

/// DejaVu Sans Bold, shipped with the crate; covers Latin text and U+2605.
static BUILTIN_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

fn builtin_face() -> PosterResult<FontArc> {
    FontArc::try_from_slice(BUILTIN_FONT)
        .map_err(|e| PosterError::input(format!("bundled font is corrupt: {e}")))
}

/// Host font database, built on first use.
struct SystemFonts {
    db: Option<usvg::fontdb::Database>,
    extra_dir: Option<PathBuf>,
}

impl SystemFonts {
    fn lazy(extra_dir: PathBuf) -> Self {
        Self {
            db: None,
            extra_dir: Some(extra_dir),
        }
    }

    /// A database with no faces; every lookup misses.
    fn empty() -> Self {
        Self {
            db: Some(usvg::fontdb::Database::new()),
            extra_dir: None,
        }
    }

    fn resolve(&mut self, role: FontRole) -> Option<(FontArc, String)> {
        let extra_dir = self.extra_dir.take();
        let db = self.db.get_or_insert_with(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            if let Some(dir) = extra_dir.as_deref().filter(|d| d.is_dir()) {
                db.load_fonts_dir(dir);
            }
            db
        });

        let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
        if role == FontRole::Rating {
            // needs U+2605
            families.push(usvg::fontdb::Family::Name("DejaVu Sans"));
        }
        families.push(usvg::fontdb::Family::SansSerif);

        let query = usvg::fontdb::Query {
            families: &families,
            weight: usvg::fontdb::Weight(role.fallback_weight()),
            stretch: usvg::fontdb::Stretch::Normal,
            style: usvg::fontdb::Style::Normal,
        };

        let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;
        let family = db
            .face(id)
            .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| "unknown".to_string());
        let font = db
            .with_face_data(id, |data, index| {
                FontVec::try_from_vec_and_index(data.to_vec(), index).ok()
            })
            .flatten()?;
        Some((FontArc::new(font), family))
    }
}
