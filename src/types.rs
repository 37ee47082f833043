use serde::Deserialize;

use crate::config::{DEFAULT_BRECHA_BS, DEFAULT_CATEGORY};

// ---------------------------------------------------------------------------
// Reading ingestion
// ---------------------------------------------------------------------------

/// Body of `POST /api/update-prices`. Every field is optional; quotes travel
/// as decimal strings exactly as the upstream workflow produced them and are
/// stored as given, without numeric validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePricesRequest {
    pub precio_bcv: Option<String>,
    pub precio_usdt: Option<String>,
    pub precio_eur: Option<String>,
    pub brecha_bs: Option<String>,
    pub brecha_porcentaje: Option<String>,
    pub variacion_mercado: Option<String>,
    pub status: Option<String>,
    pub alerta_audio: Option<bool>,
    pub mostrar_banner: Option<bool>,
    pub categoria: Option<String>,
}

/// A reading after server-side defaulting, ready to insert.
#[derive(Debug, Clone)]
pub struct NewReading {
    pub precio_bcv: Option<String>,
    pub precio_usdt: Option<String>,
    pub precio_eur: Option<String>,
    pub brecha_bs: String,
    pub brecha_porcentaje: Option<String>,
    pub variacion_mercado: Option<String>,
    /// Open-ended status string (`subiendo`, `bajando`, `estable` observed).
    /// Drives dashboard presentation only; never validated here.
    pub status: Option<String>,
    pub alerta_audio: bool,
    pub mostrar_banner: bool,
    pub categoria: String,
}

impl UpdatePricesRequest {
    pub fn into_reading(self) -> NewReading {
        NewReading {
            precio_bcv: self.precio_bcv,
            precio_usdt: self.precio_usdt,
            precio_eur: self.precio_eur,
            brecha_bs: self
                .brecha_bs
                .unwrap_or_else(|| DEFAULT_BRECHA_BS.to_string()),
            brecha_porcentaje: self.brecha_porcentaje,
            variacion_mercado: self.variacion_mercado,
            status: self.status,
            alerta_audio: self.alerta_audio.unwrap_or(false),
            mostrar_banner: self.mostrar_banner.unwrap_or(false),
            categoria: self
                .categoria
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Category filter
// ---------------------------------------------------------------------------

/// Resolve the `categoria` query parameter to the stored value it filters on.
/// Accepts the `eq.<value>` sentinel sent by the ingestion workflow as well as
/// a bare value; absent or empty falls back to the monitor feed.
pub fn canonical_category(raw: Option<&str>) -> String {
    match raw {
        Some(v) => {
            let v = v.strip_prefix("eq.").unwrap_or(v).trim();
            if v.is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                v.to_string()
            }
        }
        None => DEFAULT_CATEGORY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let reading = UpdatePricesRequest::default().into_reading();
        assert_eq!(reading.brecha_bs, "0.00");
        assert!(!reading.alerta_audio);
        assert!(!reading.mostrar_banner);
        assert_eq!(reading.categoria, "monitor");
        assert!(reading.precio_bcv.is_none());
        assert!(reading.status.is_none());
    }

    #[test]
    fn provided_values_survive_defaulting() {
        let req = UpdatePricesRequest {
            precio_bcv: Some("36.50".to_string()),
            precio_usdt: Some("40.00".to_string()),
            brecha_bs: Some("3.50".to_string()),
            alerta_audio: Some(true),
            categoria: Some("comparar".to_string()),
            ..Default::default()
        };
        let reading = req.into_reading();
        assert_eq!(reading.precio_bcv.as_deref(), Some("36.50"));
        assert_eq!(reading.precio_usdt.as_deref(), Some("40.00"));
        assert_eq!(reading.brecha_bs, "3.50");
        assert!(reading.alerta_audio);
        assert_eq!(reading.categoria, "comparar");
    }

    #[test]
    fn missing_category_param_means_monitor() {
        assert_eq!(canonical_category(None), "monitor");
    }

    #[test]
    fn eq_sentinel_is_stripped() {
        assert_eq!(canonical_category(Some("eq.comparar")), "comparar");
    }

    #[test]
    fn bare_value_passes_through() {
        assert_eq!(canonical_category(Some("comparar")), "comparar");
    }

    #[test]
    fn empty_sentinel_falls_back_to_monitor() {
        assert_eq!(canonical_category(Some("eq.")), "monitor");
        assert_eq!(canonical_category(Some("")), "monitor");
        assert_eq!(canonical_category(Some("  ")), "monitor");
    }
}
