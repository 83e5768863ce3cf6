use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Price tier selected by the user, carried on the wire as a
/// currency-symbol count ("$", "$$", "$$$").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Budget {
    #[serde(rename = "$")]
    Low,
    #[serde(rename = "$$")]
    Mid,
    #[serde(rename = "$$$")]
    High,
}

impl Budget {
    /// Wire representation, also used for priceRange equality checks in the prompt
    pub fn as_str(&self) -> &'static str {
        match self {
            Budget::Low => "$",
            Budget::Mid => "$$",
            Budget::High => "$$$",
        }
    }

    /// Tier definition sent to the AI: concrete R$ thresholds plus example
    /// venue categories, so tiers are not conflated.
    pub fn description(&self) -> &'static str {
        match self {
            Budget::Low => {
                "BARATO/POPULAR - gasto máximo R$30-50 por pessoa. Tipos de lugares: \
                 churrasquinhos de rua, tapiocarias, lanchonetes de bairro, hamburguerias \
                 simples, pizzarias populares, food trucks, espetinhos, açaiterias, \
                 creperias simples, pastelarias, cachorro-quente. NÃO são restaurantes \
                 sofisticados."
            }
            Budget::Mid => {
                "MODERADO - gasto entre R$50-150 por pessoa. Tipos de lugares: restaurantes \
                 casuais com ambiente agradável, pizzarias gourmet, sushi casual, bistrôs, \
                 hamburguerias gourmet, bares com boa comida, restaurantes de bairro bem \
                 avaliados."
            }
            Budget::High => {
                "PREMIUM/CARO - gasto acima de R$150 por pessoa. APENAS: restaurantes fine \
                 dining, alta gastronomia, frutos do mar premium, steakhouses de luxo, \
                 restaurantes com chef renomado, experiências gastronômicas exclusivas."
            }
        }
    }
}

impl Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of outing the couple is looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Gastronomia,
    Cultura,
    #[serde(rename = "ao-ar-livre")]
    AoArLivre,
    Aventura,
    Casual,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Gastronomia => "gastronomia",
            ActivityType::Cultura => "cultura",
            ActivityType::AoArLivre => "ao-ar-livre",
            ActivityType::Aventura => "aventura",
            ActivityType::Casual => "casual",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ActivityType::Gastronomia => {
                "gastronomia variada - INCLUA DIFERENTES TIPOS: japonesa (sushi, temaki), \
                 italiana (massas, pizzas), brasileira/regional (nordestina, frutos do mar), \
                 hamburguerias, churrasquinhos, tapiocarias. VARIE os tipos de culinária nas \
                 recomendações."
            }
            ActivityType::Cultura => {
                "cultura e entretenimento: museus, teatros, cinemas, galerias de arte, \
                 exposições, centros culturais, casas de shows"
            }
            ActivityType::AoArLivre => {
                "atividades ao ar livre: parques, praias, trilhas, orla, praças, mirantes, \
                 jardins"
            }
            ActivityType::Aventura => {
                "aventura e atividades: escalada, tirolesa, paintball, kart, parques de \
                 diversão, passeios de barco"
            }
            ActivityType::Casual => {
                "lugares casuais: cafeterias, bares tranquilos, sorveterias, docerias, \
                 casas de açaí"
            }
        }
    }
}

/// Time of day the date happens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Dia,
    Noite,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Dia => "dia",
            Period::Noite => "noite",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Period::Dia => "durante o dia",
            Period::Noite => "à noite",
        }
    }
}

/// Optional vibe preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ambience {
    Intimo,
    Animado,
    Tranquilo,
}

impl Ambience {
    pub fn description(&self) -> &'static str {
        match self {
            Ambience::Intimo => {
                "íntimo e reservado - mesas afastadas, iluminação baixa, ambiente romântico \
                 e privativo"
            }
            Ambience::Animado => {
                "animado e movimentado - música, pessoas, ambiente descontraído e festivo"
            }
            Ambience::Tranquilo => {
                "tranquilo e relaxante - sem música alta, ambiente calmo para conversar"
            }
        }
    }
}

/// One of three non-overlapping straight-line distance ranges from the
/// user's coordinates: perto = [0,3] km, medio = (3,10] km, longe = (10,∞).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceBand {
    Perto,
    Medio,
    Longe,
}

impl DistanceBand {
    /// Inclusive lower and upper kilometer bounds; upper is open-ended for Longe
    pub fn km_bounds(&self) -> (f64, Option<f64>) {
        match self {
            DistanceBand::Perto => (0.0, Some(3.0)),
            DistanceBand::Medio => (3.0, Some(10.0)),
            DistanceBand::Longe => (10.0, None),
        }
    }

    /// Whether a claimed distance falls inside this band
    pub fn contains(&self, km: f64) -> bool {
        match self {
            DistanceBand::Perto => km <= 3.0,
            DistanceBand::Medio => km > 3.0 && km <= 10.0,
            DistanceBand::Longe => km > 10.0,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DistanceBand::Perto => {
                "MUITO PERTO - MÁXIMO 3km de distância. Deve ser possível ir a pé ou em \
                 menos de 10 minutos de carro. REJEITE qualquer lugar acima de 3km."
            }
            DistanceBand::Medio => {
                "DISTÂNCIA MÉDIA - entre 3km e 10km. NÃO inclua lugares muito perto (menos \
                 de 3km) NEM muito longe (mais de 10km)."
            }
            DistanceBand::Longe => {
                "MAIS LONGE - acima de 10km, para explorar bairros diferentes e novos \
                 lugares da cidade."
            }
        }
    }
}

/// Validated filter set for one recommendation search.
///
/// Constructed fresh per search and never mutated afterwards. Optional
/// filters stay `None` when the user expressed no preference, which the
/// prompt builder distinguishes from an explicit value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceFilters {
    pub budget: Budget,
    #[serde(rename = "type")]
    pub activity: ActivityType,
    pub period: Period,
    #[serde(rename = "ambiente", skip_serializing_if = "Option::is_none")]
    pub ambience: Option<Ambience>,
    #[serde(rename = "distancia", skip_serializing_if = "Option::is_none")]
    pub distance: Option<DistanceBand>,
    #[serde(rename = "temEstacionamento", skip_serializing_if = "Option::is_none")]
    pub wants_parking: Option<bool>,
    #[serde(rename = "acessivel", skip_serializing_if = "Option::is_none")]
    pub wants_accessible: Option<bool>,
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_wire_format() {
        assert_eq!(serde_json::to_string(&Budget::Low).unwrap(), r#""$""#);
        assert_eq!(serde_json::to_string(&Budget::Mid).unwrap(), r#""$$""#);
        assert_eq!(serde_json::to_string(&Budget::High).unwrap(), r#""$$$""#);

        let parsed: Budget = serde_json::from_str(r#""$$""#).unwrap();
        assert_eq!(parsed, Budget::Mid);
    }

    #[test]
    fn test_activity_type_wire_format() {
        let parsed: ActivityType = serde_json::from_str(r#""ao-ar-livre""#).unwrap();
        assert_eq!(parsed, ActivityType::AoArLivre);
        assert_eq!(
            serde_json::to_string(&ActivityType::Gastronomia).unwrap(),
            r#""gastronomia""#
        );
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        assert!(serde_json::from_str::<Budget>(r#""$$$$""#).is_err());
        assert!(serde_json::from_str::<DistanceBand>(r#""muito-longe""#).is_err());
    }

    #[test]
    fn test_distance_bands_do_not_overlap() {
        assert!(DistanceBand::Perto.contains(3.0));
        assert!(!DistanceBand::Medio.contains(3.0));
        assert!(DistanceBand::Medio.contains(10.0));
        assert!(!DistanceBand::Longe.contains(10.0));
        assert!(DistanceBand::Longe.contains(10.1));
    }

    #[test]
    fn test_budget_descriptions_carry_price_thresholds() {
        assert!(Budget::Low.description().contains("R$30-50"));
        assert!(Budget::Mid.description().contains("R$50-150"));
        assert!(Budget::High.description().contains("R$150"));
    }

    #[test]
    fn test_optional_filters_are_omitted_when_unset() {
        let filters = PlaceFilters {
            budget: Budget::Mid,
            activity: ActivityType::Gastronomia,
            period: Period::Dia,
            ambience: None,
            distance: None,
            wants_parking: None,
            wants_accessible: None,
            latitude: -2.53,
            longitude: -44.30,
        };

        let json = serde_json::to_value(&filters).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("ambiente"));
        assert!(!obj.contains_key("distancia"));
        assert!(!obj.contains_key("temEstacionamento"));
        assert_eq!(obj["type"], "gastronomia");
        assert_eq!(obj["budget"], "$$");
    }
}
