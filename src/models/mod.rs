//! Tier-2 override library: one file per controller family,
//! mirroring a one-file-per-model layout generalized to
//! one-per-family since dispatch here is by family protocol, not by model.

mod acep;
mod color_gate;
mod family_7in3;
mod nonstandard;
mod ssd1677;
mod ssd1680;
mod tricolor_single;
mod uc8176;
mod uc8176_dualbuf;
mod uc8179_dualbuf;
mod uc8179_tricolor;

use std::sync::Arc;

use crate::driver::Tier2Overrides;

/// Resolve the Tier-2 override set registered for `name`, if any. Mirrors
/// `original_source/ext/chroma_wave/driver_registry.c`'s `epd_find_driver`:
/// an exact-name lookup into a fixed table, returning "no driver" (Tier-1)
/// for anything absent.
pub fn overrides_for(name: &str) -> Option<Arc<dyn Tier2Overrides>> {
    match name {
        "epd_1in54" | "epd_2in13" | "epd_2in9" => Some(Arc::new(ssd1680::Ssd1680)),
        "epd_2in9b_v4" => Some(Arc::new(ssd1680::Ssd1680Regional)),
        "epd_4in2_v2" => Some(Arc::new(ssd1677::Ssd1677)),
        "epd_2in7_v2" => Some(Arc::new(ssd1677::Ssd1677Regional)),
        "epd_4in2" | "epd_3in7" => Some(Arc::new(uc8176::Uc8176)),
        "epd_2in7" => Some(Arc::new(uc8176_dualbuf::Uc8176DualBuf)),
        "epd_1in64g" => Some(Arc::new(color_gate::ColorGate)),
        "epd_7in3f" | "epd_7in3g" => Some(Arc::new(family_7in3::Family7in3 { booster: false })),
        "epd_7in3e" => Some(Arc::new(family_7in3::Family7in3 { booster: true })),
        "epd_5in65f" | "epd_4in01f" => Some(Arc::new(acep::Acep)),
        "epd_5in83bc" => Some(Arc::new(uc8179_tricolor::Uc8179Tricolor)),
        "epd_7in5_v2" => Some(Arc::new(uc8179_dualbuf::Uc8179DualBuf)),
        "epd_7in5bc" => Some(Arc::new(tricolor_single::TricolorSingle)),
        "epd_1in02d" => Some(Arc::new(nonstandard::NonStandard)),
        "epd_5in83_v2" => Some(Arc::new(uc8179_tricolor::Uc8179Regional {
            old_data_fill: false,
        })),
        "epd_7in5b_v2" => Some(Arc::new(uc8179_tricolor::Uc8179Regional {
            old_data_fill: true,
        })),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn tier2_flag_agrees_with_driver_resolution() {
        let reg = Registry;
        for name in reg.model_names() {
            let cfg = reg.find(name).unwrap();
            assert_eq!(
                cfg.tier2,
                overrides_for(name).is_some(),
                "{name}: tier2 flag disagrees with overrides_for"
            );
        }
    }
}
