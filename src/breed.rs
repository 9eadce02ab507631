//! Static breed registry.
//!
//! Every breed is a set of overrides on top of its species' default record,
//! so a config can never be missing a field. The tables are consts; lookups
//! are total over the closed [`Breed`] enum and only string parsing can fail.

use crate::canvas::Color;
use crate::error::{EngineError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PetKind {
    Cat,
    Dog,
}

impl PetKind {
    pub const ALL: [PetKind; 2] = [PetKind::Cat, PetKind::Dog];

    pub fn id(self) -> &'static str {
        match self {
            PetKind::Cat => "cat",
            PetKind::Dog => "dog",
        }
    }

    /// The breed a host falls back to when it has nothing better.
    pub fn default_breed(self) -> Breed {
        match self {
            PetKind::Cat => Breed::Cat(CatBreed::OrangeTabby),
            PetKind::Dog => Breed::Dog(DogBreed::Shiba),
        }
    }

    pub fn breeds(self) -> Vec<Breed> {
        match self {
            PetKind::Cat => CatBreed::ALL.iter().copied().map(Breed::Cat).collect(),
            PetKind::Dog => DogBreed::ALL.iter().copied().map(Breed::Dog).collect(),
        }
    }
}

impl fmt::Display for PetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PetKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        PetKind::ALL
            .iter()
            .copied()
            .find(|k| k.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::UnknownKind(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatBreed {
    OrangeTabby,
    BritishShorthair,
    Siamese,
    Persian,
    MaineCoon,
    Ragdoll,
    Bengal,
    Sphynx,
    ScottishFold,
    RussianBlue,
    Abyssinian,
    Birman,
    ExoticShorthair,
    NorwegianForest,
    AmericanShorthair,
    DevonRex,
    Tuxedo,
    Calico,
    Bombay,
    TurkishAngora,
    Himalayan,
    Munchkin,
}

impl CatBreed {
    pub const ALL: [CatBreed; 22] = [
        CatBreed::OrangeTabby,
        CatBreed::BritishShorthair,
        CatBreed::Siamese,
        CatBreed::Persian,
        CatBreed::MaineCoon,
        CatBreed::Ragdoll,
        CatBreed::Bengal,
        CatBreed::Sphynx,
        CatBreed::ScottishFold,
        CatBreed::RussianBlue,
        CatBreed::Abyssinian,
        CatBreed::Birman,
        CatBreed::ExoticShorthair,
        CatBreed::NorwegianForest,
        CatBreed::AmericanShorthair,
        CatBreed::DevonRex,
        CatBreed::Tuxedo,
        CatBreed::Calico,
        CatBreed::Bombay,
        CatBreed::TurkishAngora,
        CatBreed::Himalayan,
        CatBreed::Munchkin,
    ];

    pub fn id(self) -> &'static str {
        match self {
            CatBreed::OrangeTabby => "orange_tabby",
            CatBreed::BritishShorthair => "british_shorthair",
            CatBreed::Siamese => "siamese",
            CatBreed::Persian => "persian",
            CatBreed::MaineCoon => "maine_coon",
            CatBreed::Ragdoll => "ragdoll",
            CatBreed::Bengal => "bengal",
            CatBreed::Sphynx => "sphynx",
            CatBreed::ScottishFold => "scottish_fold",
            CatBreed::RussianBlue => "russian_blue",
            CatBreed::Abyssinian => "abyssinian",
            CatBreed::Birman => "birman",
            CatBreed::ExoticShorthair => "exotic_shorthair",
            CatBreed::NorwegianForest => "norwegian_forest",
            CatBreed::AmericanShorthair => "american_shorthair",
            CatBreed::DevonRex => "devon_rex",
            CatBreed::Tuxedo => "tuxedo",
            CatBreed::Calico => "calico",
            CatBreed::Bombay => "bombay",
            CatBreed::TurkishAngora => "turkish_angora",
            CatBreed::Himalayan => "himalayan",
            CatBreed::Munchkin => "munchkin",
        }
    }

    pub fn config(self) -> BreedConfig {
        match self {
            CatBreed::OrangeTabby => BreedConfig {
                label: "Orange Tabby",
                palette: Palette {
                    primary: Color::hex(0xF5A04A),
                    pattern: Color::hex(0xC8651B),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    stripes: true,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::BritishShorthair => BreedConfig {
                label: "British Shorthair",
                palette: Palette {
                    primary: Color::hex(0x8E9AAF),
                    secondary: Color::hex(0xA9B3C4),
                    belly: Color::hex(0xA9B3C4),
                    pattern: Color::hex(0x6F7A8E),
                    eye: Color::hex(0xF0A202),
                    eye_alt: Color::hex(0xF0A202),
                    nose: Color::hex(0x6D6875),
                    paw: Color::hex(0x9AA5B8),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    flat_face: true,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::Siamese => BreedConfig {
                label: "Siamese",
                palette: Palette {
                    primary: Color::hex(0xF3E5C8),
                    secondary: Color::hex(0xFFF6E5),
                    pattern: Color::hex(0x5A3E36),
                    eye: Color::hex(0x4FA3E0),
                    eye_alt: Color::hex(0x4FA3E0),
                    nose: Color::hex(0x6B4B45),
                    paw: Color::hex(0x5A3E36),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    color_point: true,
                    large_ears: true,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::Persian => BreedConfig {
                label: "Persian",
                palette: Palette {
                    primary: Color::hex(0xF8F8F2),
                    secondary: Color::hex(0xFFFFFF),
                    belly: Color::hex(0xFFFFFF),
                    pattern: Color::hex(0xE0DDD5),
                    eye: Color::hex(0xE09F3E),
                    eye_alt: Color::hex(0xE09F3E),
                    paw: Color::hex(0xFFFFFF),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    long_fur: true,
                    flat_face: true,
                    fluffy_tail: true,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::MaineCoon => BreedConfig {
                label: "Maine Coon",
                palette: Palette {
                    primary: Color::hex(0x8B5A2B),
                    secondary: Color::hex(0xD7B899),
                    belly: Color::hex(0xE8D5BF),
                    pattern: Color::hex(0x4E342E),
                    eye: Color::hex(0xC0A030),
                    eye_alt: Color::hex(0xC0A030),
                    paw: Color::hex(0xE8D5BF),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    stripes: true,
                    long_fur: true,
                    fluffy_tail: true,
                    ear_tufts: true,
                    large_ears: true,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::Ragdoll => BreedConfig {
                label: "Ragdoll",
                palette: Palette {
                    primary: Color::hex(0xFAF3E0),
                    secondary: Color::hex(0xFFFFFF),
                    pattern: Color::hex(0x8D6E63),
                    eye: Color::hex(0x3D8BD9),
                    eye_alt: Color::hex(0x3D8BD9),
                    paw: Color::hex(0xFFFFFF),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    color_point: true,
                    bicolor: true,
                    long_fur: true,
                    fluffy_tail: true,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::Bengal => BreedConfig {
                label: "Bengal",
                palette: Palette {
                    primary: Color::hex(0xE0A060),
                    secondary: Color::hex(0xF3D2A4),
                    pattern: Color::hex(0x5D3A1A),
                    eye: Color::hex(0x9ACD32),
                    eye_alt: Color::hex(0x9ACD32),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    spots: true,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::Sphynx => BreedConfig {
                label: "Sphynx",
                palette: Palette {
                    primary: Color::hex(0xF2C4B6),
                    secondary: Color::hex(0xF7D6CC),
                    belly: Color::hex(0xF7D6CC),
                    pattern: Color::hex(0xD99A8A),
                    eye: Color::hex(0x8BC34A),
                    eye_alt: Color::hex(0x8BC34A),
                    inner_ear: Color::hex(0xE8A79A),
                    paw: Color::hex(0xF7D6CC),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    hairless: true,
                    large_ears: true,
                    whiskers: false,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::ScottishFold => BreedConfig {
                label: "Scottish Fold",
                palette: Palette {
                    primary: Color::hex(0xB0B7C3),
                    secondary: Color::hex(0xD5DAE1),
                    pattern: Color::hex(0x8A93A3),
                    eye: Color::hex(0xE39B2D),
                    eye_alt: Color::hex(0xE39B2D),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    pointed_ears: false,
                    folded_ears: true,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::RussianBlue => BreedConfig {
                label: "Russian Blue",
                palette: Palette {
                    primary: Color::hex(0x7D8CA3),
                    secondary: Color::hex(0x94A2B8),
                    belly: Color::hex(0x94A2B8),
                    pattern: Color::hex(0x66748A),
                    eye: Color::hex(0x43A047),
                    eye_alt: Color::hex(0x43A047),
                    nose: Color::hex(0x5C6B7A),
                    paw: Color::hex(0x8795AC),
                    ..CAT_DEFAULT.palette
                },
                flags: CAT_DEFAULT.flags,
            },
            CatBreed::Abyssinian => BreedConfig {
                label: "Abyssinian",
                palette: Palette {
                    primary: Color::hex(0xC1773C),
                    secondary: Color::hex(0xE3B07F),
                    pattern: Color::hex(0x7A4520),
                    eye: Color::hex(0xDAA520),
                    eye_alt: Color::hex(0xDAA520),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    large_ears: true,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::Birman => BreedConfig {
                label: "Birman",
                palette: Palette {
                    primary: Color::hex(0xF5EBD7),
                    secondary: Color::hex(0xFFFFFF),
                    pattern: Color::hex(0x6D4C41),
                    eye: Color::hex(0x3F7FD1),
                    eye_alt: Color::hex(0x3F7FD1),
                    paw: Color::hex(0xFFFFFF),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    color_point: true,
                    bicolor: true,
                    long_fur: true,
                    fluffy_tail: true,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::ExoticShorthair => BreedConfig {
                label: "Exotic Shorthair",
                palette: Palette {
                    primary: Color::hex(0xD9A066),
                    secondary: Color::hex(0xEFCB9E),
                    pattern: Color::hex(0xA86E35),
                    eye: Color::hex(0xE67E22),
                    eye_alt: Color::hex(0xE67E22),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    flat_face: true,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::NorwegianForest => BreedConfig {
                label: "Norwegian Forest",
                palette: Palette {
                    primary: Color::hex(0xA1887F),
                    secondary: Color::hex(0xD7CCC8),
                    belly: Color::hex(0xEFEBE9),
                    pattern: Color::hex(0x5D4037),
                    eye: Color::hex(0x8DB33A),
                    eye_alt: Color::hex(0x8DB33A),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    stripes: true,
                    long_fur: true,
                    fluffy_tail: true,
                    ear_tufts: true,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::AmericanShorthair => BreedConfig {
                label: "American Shorthair",
                palette: Palette {
                    primary: Color::hex(0xC0C0C0),
                    secondary: Color::hex(0xE0E0E0),
                    pattern: Color::hex(0x333333),
                    eye: Color::hex(0x6CA83A),
                    eye_alt: Color::hex(0x6CA83A),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    stripes: true,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::DevonRex => BreedConfig {
                label: "Devon Rex",
                palette: Palette {
                    primary: Color::hex(0xD7CCC8),
                    secondary: Color::hex(0xEFEBE9),
                    pattern: Color::hex(0x8D6E63),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    large_ears: true,
                    curly_fur: true,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::Tuxedo => BreedConfig {
                label: "Tuxedo",
                palette: Palette {
                    primary: Color::hex(0x212121),
                    secondary: Color::hex(0xFAFAFA),
                    belly: Color::hex(0xFAFAFA),
                    pattern: Color::hex(0x000000),
                    eye: Color::hex(0xFFD54F),
                    eye_alt: Color::hex(0xFFD54F),
                    inner_ear: Color::hex(0xB07A85),
                    paw: Color::hex(0xFAFAFA),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    bicolor: true,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::Calico => BreedConfig {
                label: "Calico",
                palette: Palette {
                    primary: Color::hex(0xFAFAFA),
                    secondary: Color::hex(0xE67E22),
                    belly: Color::hex(0xFFFFFF),
                    pattern: Color::hex(0x212121),
                    eye: Color::hex(0xC5A000),
                    eye_alt: Color::hex(0xC5A000),
                    paw: Color::hex(0xFFFFFF),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    patches: true,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::Bombay => BreedConfig {
                label: "Bombay",
                palette: Palette {
                    primary: Color::hex(0x1B1B1B),
                    secondary: Color::hex(0x2A2A2A),
                    belly: Color::hex(0x262626),
                    pattern: Color::hex(0x111111),
                    eye: Color::hex(0xFFB300),
                    eye_alt: Color::hex(0xFFB300),
                    nose: Color::hex(0x3A3A3A),
                    inner_ear: Color::hex(0x4A4A4A),
                    paw: Color::hex(0x262626),
                },
                flags: CAT_DEFAULT.flags,
            },
            CatBreed::TurkishAngora => BreedConfig {
                label: "Turkish Angora",
                palette: Palette {
                    primary: Color::hex(0xFDFDFD),
                    secondary: Color::hex(0xFFFFFF),
                    belly: Color::hex(0xFFFFFF),
                    pattern: Color::hex(0xE6E6E6),
                    eye: Color::hex(0x42A5F5),
                    eye_alt: Color::hex(0xFFC107),
                    paw: Color::hex(0xFFFFFF),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    long_fur: true,
                    fluffy_tail: true,
                    odd_eyes: true,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::Himalayan => BreedConfig {
                label: "Himalayan",
                palette: Palette {
                    primary: Color::hex(0xF7EEDD),
                    secondary: Color::hex(0xFFFFFF),
                    pattern: Color::hex(0x4E3B31),
                    eye: Color::hex(0x2E86DE),
                    eye_alt: Color::hex(0x2E86DE),
                    paw: Color::hex(0x4E3B31),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    color_point: true,
                    long_fur: true,
                    flat_face: true,
                    fluffy_tail: true,
                    ..CAT_DEFAULT.flags
                },
            },
            CatBreed::Munchkin => BreedConfig {
                label: "Munchkin",
                palette: Palette {
                    primary: Color::hex(0xE8B07A),
                    secondary: Color::hex(0xF6DDBF),
                    pattern: Color::hex(0xB97A40),
                    ..CAT_DEFAULT.palette
                },
                flags: ShapeFlags {
                    short_legs: true,
                    ..CAT_DEFAULT.flags
                },
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DogBreed {
    Shiba,
    Husky,
    GoldenRetriever,
    Corgi,
    Poodle,
}

impl DogBreed {
    pub const ALL: [DogBreed; 5] = [
        DogBreed::Shiba,
        DogBreed::Husky,
        DogBreed::GoldenRetriever,
        DogBreed::Corgi,
        DogBreed::Poodle,
    ];

    pub fn id(self) -> &'static str {
        match self {
            DogBreed::Shiba => "shiba",
            DogBreed::Husky => "husky",
            DogBreed::GoldenRetriever => "golden_retriever",
            DogBreed::Corgi => "corgi",
            DogBreed::Poodle => "poodle",
        }
    }

    pub fn config(self) -> BreedConfig {
        match self {
            DogBreed::Shiba => BreedConfig {
                label: "Shiba Inu",
                palette: Palette {
                    primary: Color::hex(0xD9823B),
                    secondary: Color::hex(0xFFF3E0),
                    belly: Color::hex(0xFFF3E0),
                    paw: Color::hex(0xFFF3E0),
                    ..DOG_DEFAULT.palette
                },
                flags: ShapeFlags {
                    pointed_ears: true,
                    flop_ears: false,
                    curly_tail: true,
                    bicolor: true,
                    ..DOG_DEFAULT.flags
                },
            },
            DogBreed::Husky => BreedConfig {
                label: "Siberian Husky",
                palette: Palette {
                    primary: Color::hex(0x6E7B8B),
                    secondary: Color::hex(0xF5F5F5),
                    belly: Color::hex(0xF5F5F5),
                    pattern: Color::hex(0x4A5563),
                    eye: Color::hex(0x64B5F6),
                    eye_alt: Color::hex(0x64B5F6),
                    paw: Color::hex(0xF5F5F5),
                    ..DOG_DEFAULT.palette
                },
                flags: ShapeFlags {
                    pointed_ears: true,
                    flop_ears: false,
                    fluffy_tail: true,
                    face_mask: true,
                    ..DOG_DEFAULT.flags
                },
            },
            DogBreed::GoldenRetriever => BreedConfig {
                label: "Golden Retriever",
                palette: Palette {
                    primary: Color::hex(0xE1A95F),
                    secondary: Color::hex(0xF0C987),
                    belly: Color::hex(0xF3D29B),
                    pattern: Color::hex(0xC58B42),
                    ..DOG_DEFAULT.palette
                },
                flags: ShapeFlags {
                    fluffy_tail: true,
                    long_fur: true,
                    ..DOG_DEFAULT.flags
                },
            },
            DogBreed::Corgi => BreedConfig {
                label: "Corgi",
                palette: Palette {
                    primary: Color::hex(0xE08A3C),
                    secondary: Color::hex(0xFFFFFF),
                    belly: Color::hex(0xFFFFFF),
                    paw: Color::hex(0xFFFFFF),
                    ..DOG_DEFAULT.palette
                },
                flags: ShapeFlags {
                    pointed_ears: true,
                    large_ears: true,
                    flop_ears: false,
                    bicolor: true,
                    short_legs: true,
                    short_tail: true,
                    ..DOG_DEFAULT.flags
                },
            },
            DogBreed::Poodle => BreedConfig {
                label: "Poodle",
                palette: Palette {
                    primary: Color::hex(0xE8C9A0),
                    secondary: Color::hex(0xF2DDBF),
                    belly: Color::hex(0xF2DDBF),
                    pattern: Color::hex(0xD4AF7F),
                    paw: Color::hex(0xF2DDBF),
                    ..DOG_DEFAULT.palette
                },
                flags: ShapeFlags {
                    curly_fur: true,
                    fluffy_tail: true,
                    ..DOG_DEFAULT.flags
                },
            },
        }
    }
}

/// A species-qualified breed. This is what scenes and the painter consume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Breed {
    Cat(CatBreed),
    Dog(DogBreed),
}

impl Breed {
    pub fn kind(self) -> PetKind {
        match self {
            Breed::Cat(_) => PetKind::Cat,
            Breed::Dog(_) => PetKind::Dog,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Breed::Cat(b) => b.id(),
            Breed::Dog(b) => b.id(),
        }
    }

    pub fn config(self) -> BreedConfig {
        lookup(self)
    }

    pub fn all() -> impl Iterator<Item = Breed> {
        CatBreed::ALL
            .into_iter()
            .map(Breed::Cat)
            .chain(DogBreed::ALL.into_iter().map(Breed::Dog))
    }

    /// Resolve a `(kind, breed)` pair of host identifiers.
    ///
    /// A breed id that exists for the other species is reported as a
    /// mismatch rather than as unknown.
    pub fn parse(kind: &str, breed: &str) -> Result<Breed> {
        let kind: PetKind = kind.parse()?;
        let wanted = breed.trim();
        let hit = |k: PetKind| k.breeds().into_iter().find(|b| b.id() == wanted);
        if let Some(b) = hit(kind) {
            return Ok(b);
        }
        let other = match kind {
            PetKind::Cat => PetKind::Dog,
            PetKind::Dog => PetKind::Cat,
        };
        if hit(other).is_some() {
            return Err(EngineError::BreedKindMismatch {
                kind: kind.id().to_string(),
                breed: wanted.to_string(),
            });
        }
        Err(EngineError::UnknownBreed {
            kind: kind.id().to_string(),
            breed: wanted.to_string(),
        })
    }

    /// Next breed of the same species, wrapping around.
    pub fn cycle(self, step: i32) -> Breed {
        let list = self.kind().breeds();
        let pos = list.iter().position(|b| *b == self).unwrap_or(0) as i32;
        let n = list.len() as i32;
        list[(pos + step).rem_euclid(n) as usize]
    }
}

impl fmt::Display for Breed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind(), self.id())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub belly: Color,
    pub pattern: Color,
    pub eye: Color,
    /// Right eye; equals `eye` unless the breed is odd-eyed.
    pub eye_alt: Color,
    pub nose: Color,
    pub inner_ear: Color,
    pub paw: Color,
}

/// Shape switches read by the painter. Any combination is drawable, named
/// breeds just pick a handful.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeFlags {
    pub pointed_ears: bool,
    pub flop_ears: bool,
    pub folded_ears: bool,
    pub large_ears: bool,
    pub ear_tufts: bool,
    pub fluffy_tail: bool,
    pub curly_tail: bool,
    pub short_tail: bool,
    pub curly_fur: bool,
    pub long_fur: bool,
    pub hairless: bool,
    pub flat_face: bool,
    pub long_snout: bool,
    pub color_point: bool,
    pub stripes: bool,
    pub spots: bool,
    pub patches: bool,
    pub bicolor: bool,
    pub face_mask: bool,
    pub odd_eyes: bool,
    pub short_legs: bool,
    pub whiskers: bool,
    pub tongue: bool,
}

impl ShapeFlags {
    pub const NONE: ShapeFlags = ShapeFlags {
        pointed_ears: false,
        flop_ears: false,
        folded_ears: false,
        large_ears: false,
        ear_tufts: false,
        fluffy_tail: false,
        curly_tail: false,
        short_tail: false,
        curly_fur: false,
        long_fur: false,
        hairless: false,
        flat_face: false,
        long_snout: false,
        color_point: false,
        stripes: false,
        spots: false,
        patches: false,
        bicolor: false,
        face_mask: false,
        odd_eyes: false,
        short_legs: false,
        whiskers: false,
        tongue: false,
    };

    pub const ALL: ShapeFlags = ShapeFlags {
        pointed_ears: true,
        flop_ears: true,
        folded_ears: true,
        large_ears: true,
        ear_tufts: true,
        fluffy_tail: true,
        curly_tail: true,
        short_tail: true,
        curly_fur: true,
        long_fur: true,
        hairless: true,
        flat_face: true,
        long_snout: true,
        color_point: true,
        stripes: true,
        spots: true,
        patches: true,
        bicolor: true,
        face_mask: true,
        odd_eyes: true,
        short_legs: true,
        whiskers: true,
        tongue: true,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BreedConfig {
    pub label: &'static str,
    pub palette: Palette,
    pub flags: ShapeFlags,
}

pub const CAT_DEFAULT: BreedConfig = BreedConfig {
    label: "Cat",
    palette: Palette {
        primary: Color::hex(0xF4A460),
        secondary: Color::hex(0xFFE4C4),
        belly: Color::hex(0xFFF5E6),
        pattern: Color::hex(0xD2691E),
        eye: Color::hex(0x7CB342),
        eye_alt: Color::hex(0x7CB342),
        nose: Color::hex(0xFF9AA2),
        inner_ear: Color::hex(0xFFB6C1),
        paw: Color::hex(0xFFF5E6),
    },
    flags: ShapeFlags {
        pointed_ears: true,
        whiskers: true,
        ..ShapeFlags::NONE
    },
};

pub const DOG_DEFAULT: BreedConfig = BreedConfig {
    label: "Dog",
    palette: Palette {
        primary: Color::hex(0xD2A06D),
        secondary: Color::hex(0xF1DDC3),
        belly: Color::hex(0xF1DDC3),
        pattern: Color::hex(0x8B6240),
        eye: Color::hex(0x3E2723),
        eye_alt: Color::hex(0x3E2723),
        nose: Color::hex(0x212121),
        inner_ear: Color::hex(0xA1887F),
        paw: Color::hex(0xF1DDC3),
    },
    flags: ShapeFlags {
        flop_ears: true,
        long_snout: true,
        tongue: true,
        ..ShapeFlags::NONE
    },
};

pub fn lookup(breed: Breed) -> BreedConfig {
    match breed {
        Breed::Cat(b) => b.config(),
        Breed::Dog(b) => b.config(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_breed_has_a_fully_opaque_palette() {
        for breed in Breed::all() {
            let cfg = lookup(breed);
            assert!(!cfg.label.is_empty(), "{breed} has no label");
            let p = cfg.palette;
            for c in [
                p.primary,
                p.secondary,
                p.belly,
                p.pattern,
                p.eye,
                p.eye_alt,
                p.nose,
                p.inner_ear,
                p.paw,
            ] {
                assert_eq!(c.a, 255, "{breed} has a transparent palette entry");
            }
        }
    }

    #[test]
    fn registry_sizes() {
        assert_eq!(PetKind::Cat.breeds().len(), 22);
        assert_eq!(PetKind::Dog.breeds().len(), 5);
        assert_eq!(Breed::all().count(), 27);
    }

    #[test]
    fn ids_are_unique_and_parse_back() {
        let mut seen = std::collections::HashSet::new();
        for breed in Breed::all() {
            assert!(seen.insert(breed.id()), "duplicate id {}", breed.id());
            assert_eq!(Breed::parse(breed.kind().id(), breed.id()).unwrap(), breed);
        }
    }

    #[test]
    fn parse_failures_are_loud() {
        assert!(matches!(
            Breed::parse("cat", "husky"),
            Err(EngineError::BreedKindMismatch { .. })
        ));
        assert!(matches!(
            Breed::parse("dog", "wolfhound"),
            Err(EngineError::UnknownBreed { .. })
        ));
        assert!(matches!(
            Breed::parse("ferret", "siamese"),
            Err(EngineError::UnknownKind(_))
        ));
    }

    #[test]
    fn overrides_leave_unrelated_fields_at_default() {
        let siamese = CatBreed::Siamese.config();
        assert!(siamese.flags.color_point);
        assert!(siamese.flags.pointed_ears);
        assert_eq!(siamese.palette.inner_ear, CAT_DEFAULT.palette.inner_ear);
        let husky = DogBreed::Husky.config();
        assert!(husky.flags.face_mask && !husky.flags.flop_ears);
        assert!(husky.flags.long_snout);
    }

    #[test]
    fn cycling_wraps_within_species() {
        let first = Breed::Dog(DogBreed::Shiba);
        assert_eq!(first.cycle(-1), Breed::Dog(DogBreed::Poodle));
        assert_eq!(first.cycle(5), first);
    }
}
