//! Built-in CRC model presets.
//!
//! A small cross-section of the CRC RevEng catalogue, spanning widths from 5
//! to 82 bits so every register-handling path has a preset exercising it.
//! Each entry carries its published check value and [`Catalog::verify`]
//! recomputes them all.

use tracing::info;
use traits::{Calculator, ModelError, Value};

use crate::crc::Crc;
use crate::model::CrcModel;
use crate::polynomial::{Notation, Polynomial};

/// The input every published check value is defined over.
const CHECK_INPUT: &[u8] = b"123456789";

/// Collection of preset CRC models, searchable by id or alias.
#[derive(Debug, Clone)]
pub struct Catalog {
  models: Vec<CrcModel>,
}

struct Preset {
  id: &'static str,
  aliases: &'static [&'static str],
  width: u64,
  poly: u128,
  reflect: bool,
  xor_in: u128,
  xor_out: u128,
  check: u128,
}

const PRESETS: &[Preset] = &[
  Preset {
    id: "crc-5/usb",
    aliases: &[],
    width: 5,
    poly: 0x05,
    reflect: true,
    xor_in: 0x1F,
    xor_out: 0x1F,
    check: 0x19,
  },
  Preset {
    id: "crc-8/smbus",
    aliases: &["crc-8"],
    width: 8,
    poly: 0x07,
    reflect: false,
    xor_in: 0,
    xor_out: 0,
    check: 0xF4,
  },
  Preset {
    id: "crc-16/arc",
    aliases: &["crc-16", "arc"],
    width: 16,
    poly: 0x8005,
    reflect: true,
    xor_in: 0,
    xor_out: 0,
    check: 0xBB3D,
  },
  Preset {
    id: "crc-16/ccitt-false",
    aliases: &["crc-ccitt"],
    width: 16,
    poly: 0x1021,
    reflect: false,
    xor_in: 0xFFFF,
    xor_out: 0,
    check: 0x29B1,
  },
  Preset {
    id: "crc-24/openpgp",
    aliases: &["crc-24"],
    width: 24,
    poly: 0x86_4CFB,
    reflect: false,
    xor_in: 0xB7_04CE,
    xor_out: 0,
    check: 0x21_CF02,
  },
  Preset {
    id: "crc-32/iso-hdlc",
    aliases: &["crc-32", "pkzip"],
    width: 32,
    poly: 0x04C1_1DB7,
    reflect: true,
    xor_in: 0xFFFF_FFFF,
    xor_out: 0xFFFF_FFFF,
    check: 0xCBF4_3926,
  },
  Preset {
    id: "crc-32/iscsi",
    aliases: &["crc-32c"],
    width: 32,
    poly: 0x1EDC_6F41,
    reflect: true,
    xor_in: 0xFFFF_FFFF,
    xor_out: 0xFFFF_FFFF,
    check: 0xE306_9283,
  },
  Preset {
    id: "crc-64/xz",
    aliases: &["crc-64/go-ecma"],
    width: 64,
    poly: 0x42F0_E1EB_A9EA_3693,
    reflect: true,
    xor_in: 0xFFFF_FFFF_FFFF_FFFF,
    xor_out: 0xFFFF_FFFF_FFFF_FFFF,
    check: 0x995D_C9BB_DF19_39FA,
  },
  Preset {
    id: "crc-82/darc",
    aliases: &[],
    width: 82,
    poly: 0x0308C_0111_0114_0144_0411,
    reflect: true,
    xor_in: 0,
    xor_out: 0,
    check: 0x09EA8_3F62_5023_801F_D612,
  },
];

impl Catalog {
  /// Construct the built-in catalogue.
  pub fn builtin() -> Result<Self, ModelError> {
    let mut models = Vec::with_capacity(PRESETS.len());
    for preset in PRESETS {
      let polynomial = Polynomial::new(&Value::from(preset.poly), Notation::Normal, Some(preset.width))?;
      let mut builder = CrcModel::builder(preset.id, polynomial)
        .reflect_in(preset.reflect)
        .xor_in(Value::from(preset.xor_in))
        .reflect_out(preset.reflect)
        .xor_out(Value::from(preset.xor_out))
        .check(Value::from(preset.check));
      for alias in preset.aliases {
        builder = builder.alias(*alias);
      }
      models.push(builder.build()?);
    }
    Ok(Self { models })
  }

  /// All models in the catalogue.
  #[must_use]
  pub fn models(&self) -> &[CrcModel] {
    &self.models
  }

  /// Look up a model by id or alias, case-insensitively.
  #[must_use]
  pub fn find(&self, name: &str) -> Option<&CrcModel> {
    self.models.iter().find(|m| m.matches(name))
  }

  /// Recompute every declared check value.
  pub fn verify(&self) -> Result<(), ModelError> {
    for model in &self.models {
      let Some(declared) = model.check() else { continue };
      let mut crc = Crc::new(model.clone());
      crc.update_bytes(CHECK_INPUT);
      let computed = crc.register();
      if &computed != declared {
        return Err(ModelError::CheckMismatch {
          id: model.id().to_owned(),
          computed: format!("{computed:#x}"),
          declared: format!("{declared:#x}"),
        });
      }
    }
    info!(models = self.models.len(), "catalogue check values verified");
    Ok(())
  }
}
