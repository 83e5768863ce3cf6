use std::fmt::Write;

use crate::models::{ActivityType, Budget, DistanceBand, PlaceFilters};

/// Fixed system-role message for the completion call
pub const SYSTEM_PROMPT: &str = "Você é um assistente especializado em recomendações de \
     lugares românticos. Sempre responda em JSON válido.";

/// Number of candidates the AI is asked for; it may return fewer
pub const TARGET_COUNT: usize = 5;

/// How strongly the prompt enforces the active filters.
///
/// `Strict` states every filter as a hard constraint and closes with a
/// per-constraint pass/fail checklist the model must apply to each
/// candidate. `Soft` states the same filters as preferences, without the
/// rejection rules. The server always uses `Strict`; `Soft` exists for
/// experimentation against models that over-reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    Strict,
    Soft,
}

/// Deterministically renders the instruction block for one search.
///
/// Pure function of the filters: correctness of distance/price bounds is
/// pushed into explicit, testable rules here because the upstream model is
/// not directly steerable. The normalizer is the second line of defense.
pub fn build_prompt(filters: &PlaceFilters, mode: PromptMode) -> String {
    let mut p = String::with_capacity(4096);

    let _ = writeln!(
        p,
        "Você é um especialista em recomendações para casais em São Luís, Maranhão, Brasil.\n"
    );

    if mode == PromptMode::Strict {
        p.push_str("🚨🚨🚨 REGRAS CRÍTICAS - LEIA COM ATENÇÃO 🚨🚨🚨\n\n");
        push_distance_rules(&mut p, filters);
        push_budget_rules(&mut p, filters.budget);
        let _ = writeln!(
            p,
            "🎯 MISSÃO: Encontre {} lugares REAIS em São Luís/MA que RESPEITEM AS \
             RESTRIÇÕES ACIMA.\n",
            TARGET_COUNT
        );
    } else {
        let _ = writeln!(
            p,
            "🎯 MISSÃO: Encontre {} lugares REAIS em São Luís/MA adequados para um \
             encontro romântico, dando preferência aos critérios abaixo.\n",
            TARGET_COUNT
        );
        push_soft_location(&mut p, filters);
    }

    let _ = writeln!(p, "📍 Cidade: São Luís, Maranhão, Brasil");
    let _ = writeln!(p, "💰 ORÇAMENTO: {}", filters.budget.description());
    let _ = writeln!(p, "🎭 TIPO: {}", filters.activity.description());
    push_dining_guidance(&mut p, filters);
    let _ = writeln!(p, "⏰ PERÍODO: {}", filters.period.description());

    if let Some(ambience) = filters.ambience {
        let _ = writeln!(p, "🎵 AMBIENTE: {}", ambience.description());
    }
    if filters.wants_parking == Some(true) {
        let _ = writeln!(
            p,
            "🅿️ DEVE ter estacionamento próprio ou fácil acesso a estacionamento"
        );
    }
    if filters.wants_accessible == Some(true) {
        let _ = writeln!(
            p,
            "♿ DEVE ser acessível para cadeirantes (rampas, banheiros adaptados, etc)"
        );
    }

    if mode == PromptMode::Strict {
        push_inclusion_checklist(&mut p, filters);
    }

    push_field_instructions(&mut p);
    push_output_contract(&mut p);

    if mode == PromptMode::Strict {
        push_final_validation(&mut p, filters);
    }

    let _ = write!(
        p,
        "IMPORTANTE: \n\
         - BUSQUE informações REAIS na web. NÃO invente.\n\
         - Retorne APENAS JSON válido.\n\
         - NÃO inclua referências numéricas entre colchetes.\n\
         - Se não encontrar {} lugares que passem na validação, retorne menos lugares.",
        TARGET_COUNT
    );

    p
}

fn push_distance_rules(p: &mut String, filters: &PlaceFilters) {
    p.push_str("❌ RESTRIÇÃO DE DISTÂNCIA (OBRIGATÓRIA):\n");
    match filters.distance {
        Some(DistanceBand::Perto) => {
            let _ = writeln!(
                p,
                "- O usuário quer lugares MUITO PERTO, a NO MÁXIMO 3 QUILÔMETROS de distância.\n\
                 - Localização do usuário: Latitude {}, Longitude {}\n\
                 - CALCULE a distância de cada lugar antes de incluir.\n\
                 - Se a distância for maior que 3km, NÃO INCLUA O LUGAR.\n\
                 - Lugares a 5km, 8km, 10km = REJEITADOS. Apenas lugares até 3km.\n\
                 - Priorize o MESMO BAIRRO ou bairros IMEDIATAMENTE vizinhos.",
                filters.latitude, filters.longitude
            );
        }
        Some(DistanceBand::Medio) => {
            let _ = writeln!(
                p,
                "- O usuário quer lugares a DISTÂNCIA MÉDIA, entre 3km e 10km.\n\
                 - Localização: Lat {}, Lon {}\n\
                 - CALCULE a distância em linha reta de cada lugar antes de incluir.\n\
                 - NÃO inclua lugares muito perto (menos de 3km) nem muito longe (mais de 10km).",
                filters.latitude, filters.longitude
            );
        }
        Some(DistanceBand::Longe) => {
            let _ = writeln!(
                p,
                "- O usuário quer EXPLORAR lugares mais distantes, acima de 10km.\n\
                 - Localização: Lat {}, Lon {}",
                filters.latitude, filters.longitude
            );
        }
        None => {
            let _ = writeln!(
                p,
                "- Localização do usuário: Lat {}, Lon {}\n\
                 - Priorize lugares relativamente próximos.",
                filters.latitude, filters.longitude
            );
        }
    }
    p.push('\n');
}

fn push_budget_rules(p: &mut String, budget: Budget) {
    p.push_str("❌ RESTRIÇÃO DE ORÇAMENTO (OBRIGATÓRIA):\n");
    match budget {
        Budget::Low => {
            p.push_str(
                "- O usuário quer opções BARATAS/POPULARES (máximo R$30-50 por pessoa).\n\
                 - TIPOS DE LUGARES ESPERADOS: churrasquinhos, tapiocarias, lanchonetes de \
                 bairro, espetinhos, food trucks, açaiterias, pastelarias, hamburguerias \
                 simples.\n\
                 - NÃO são restaurantes sofisticados, bistrôs ou lugares caros.\n\
                 - Se o lugar tem preço médio acima de R$50, NÃO INCLUA.\n",
            );
        }
        Budget::Mid => {
            p.push_str(
                "- O usuário quer opções de PREÇO MODERADO (R$50-150 por pessoa).\n\
                 - TIPOS DE LUGARES: restaurantes casuais, pizzarias, sushi casual, \
                 hamburguerias gourmet, bares com boa comida.\n\
                 - NÃO inclua churrasquinhos de rua (muito barato) nem fine dining (muito \
                 caro).\n",
            );
        }
        Budget::High => {
            p.push_str(
                "- O usuário quer opções PREMIUM/CARAS (acima de R$150 por pessoa).\n\
                 - APENAS: restaurantes fine dining, alta gastronomia, experiências \
                 exclusivas.\n\
                 - NÃO inclua lugares simples ou populares.\n",
            );
        }
    }
    p.push('\n');
}

fn push_soft_location(p: &mut String, filters: &PlaceFilters) {
    let _ = writeln!(
        p,
        "📌 Localização do usuário: Lat {}, Lon {}",
        filters.latitude, filters.longitude
    );
    if let Some(band) = filters.distance {
        let _ = writeln!(p, "📏 DISTÂNCIA PREFERIDA: {}", band.description());
    }
    p.push('\n');
}

fn push_dining_guidance(p: &mut String, filters: &PlaceFilters) {
    if filters.activity != ActivityType::Gastronomia {
        return;
    }
    if filters.budget == Budget::Low {
        p.push_str(
            "\n🍽️ PARA OPÇÃO BARATA - INCLUA:\n\
             - Churrasquinhos famosos de São Luís\n\
             - Tapiocarias bem avaliadas\n\
             - Lanchonetes populares com boa comida\n\
             - Espetinhos e churrasquinhos de rua\n\
             - Food trucks conhecidos\n\
             - Lugares simples mas gostosos para casais\n\n",
        );
    } else {
        p.push_str(
            "\n🍽️ DIVERSIDADE GASTRONÔMICA:\n\
             - Varie os tipos de culinária (japonesa, italiana, regional, frutos do mar, etc)\n\n",
        );
    }
}

fn push_inclusion_checklist(p: &mut String, filters: &PlaceFilters) {
    let distance_test = match filters.distance {
        Some(DistanceBand::Perto) => "máximo 3km",
        Some(DistanceBand::Medio) => "3-10km",
        Some(DistanceBand::Longe) => "acima de 10km",
        None => "qualquer",
    };
    let price_test = match filters.budget {
        Budget::Low => "barato, até R$50",
        Budget::Mid => "moderado, R$50-150",
        Budget::High => "caro, acima de R$150",
    };

    let _ = writeln!(
        p,
        "\n🔍 ANTES DE INCLUIR CADA LUGAR, VERIFIQUE:\n\
         1. A distância está dentro do limite? ({})\n\
         2. O preço está correto? ({})\n\
         3. É um lugar REAL que existe em São Luís?\n\
         4. Funciona no período {}?",
        distance_test,
        price_test,
        filters.period.description()
    );
    if let Some(ambience) = filters.ambience {
        let _ = writeln!(p, "5. O ambiente DEVE ser {}", ambience.description());
    }
}

fn push_field_instructions(p: &mut String) {
    p.push_str(
        "\n📝 PARA CADA LUGAR:\n\
         - Nome EXATO e COMPLETO do estabelecimento\n\
         - Endereço COMPLETO: \"Rua/Av. Nome, Número - Bairro, São Luís - MA, CEP\"\n\
         - priceRange: faixa de preço real do estabelecimento (\"$\", \"$$\" ou \"$$$\")\n\
         - distanceKm: distância aproximada em km da localização do usuário\n\
         - cuisineType: tipo de culinária (ex: \"Japonesa\", \"Italiana\", \"Frutos do Mar\", \
         \"Brasileira\")\n\
         - Descrição romântica (2-3 frases)\n\
         - Avaliação (0-5)\n\
         - Horário de funcionamento\n\
         - Sugestão de atividade romântica\n\
         - Dica especial\n",
    );
}

fn push_output_contract(p: &mut String) {
    p.push_str(
        "\n🎨 RETORNE JSON NESTE FORMATO EXATO:\n\
         {\n\
         \x20 \"recommendations\": [\n\
         \x20   {\n\
         \x20     \"name\": \"Nome Exato do Estabelecimento\",\n\
         \x20     \"address\": \"Rua/Av. Nome Completo, Número - Bairro, São Luís - MA\",\n\
         \x20     \"neighborhood\": \"Nome do Bairro\",\n\
         \x20     \"priceRange\": \"$$\",\n\
         \x20     \"distanceKm\": 3.5,\n\
         \x20     \"cuisineType\": \"Japonesa\",\n\
         \x20     \"description\": \"Por que é perfeito para um encontro romântico\",\n\
         \x20     \"rating\": 4.5,\n\
         \x20     \"openingHours\": \"Seg-Sex: 18h-23h, Sáb-Dom: 12h-23h\",\n\
         \x20     \"romanticActivity\": \"Sugestão de atividade romântica\",\n\
         \x20     \"specialTip\": \"Dica especial para o casal\",\n\
         \x20     \"temEstacionamento\": true,\n\
         \x20     \"acessivel\": false\n\
         \x20   }\n\
         \x20 ]\n\
         }\n",
    );
}

fn push_final_validation(p: &mut String, filters: &PlaceFilters) {
    p.push_str("\n⚠️ VALIDAÇÃO FINAL - CADA LUGAR DEVE PASSAR NESTES TESTES:\n");
    match filters.distance {
        Some(DistanceBand::Perto) => {
            p.push_str("✅ distanceKm <= 3.0? Se distanceKm > 3.0, REJEITE o lugar.\n");
        }
        Some(DistanceBand::Medio) => {
            p.push_str("✅ 3.0 <= distanceKm <= 10.0? Se não, REJEITE.\n");
        }
        Some(DistanceBand::Longe) => {
            p.push_str("✅ distanceKm > 10.0? Se não, REJEITE.\n");
        }
        None => {}
    }
    let _ = writeln!(
        p,
        "✅ priceRange === \"{}\"? Se não, REJEITE.",
        filters.budget.as_str()
    );
    let _ = writeln!(p, "✅ Funciona {}?", filters.period.description());
    if filters.activity == ActivityType::Gastronomia && filters.budget == Budget::Low {
        p.push_str("✅ É um lugar POPULAR/BARATO (churrasquinho, tapiocaria, lanchonete)?\n");
    }
    p.push_str("\n🚫 LUGARES REJEITADOS = NÃO INCLUA NA LISTA. BUSQUE OUTRO QUE PASSE NA VALIDAÇÃO.\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ambience, Period};

    fn base_filters() -> PlaceFilters {
        PlaceFilters {
            budget: Budget::Mid,
            activity: ActivityType::Gastronomia,
            period: Period::Dia,
            ambience: None,
            distance: None,
            wants_parking: None,
            wants_accessible: None,
            latitude: -2.5307,
            longitude: -44.3068,
        }
    }

    #[test]
    fn test_prompt_embeds_budget_tier_definition() {
        let prompt = build_prompt(&base_filters(), PromptMode::Strict);
        assert!(prompt.contains("R$50-150"));
        assert!(prompt.contains("RESTRIÇÃO DE ORÇAMENTO"));
    }

    #[test]
    fn test_prompt_embeds_coordinates() {
        let prompt = build_prompt(&base_filters(), PromptMode::Strict);
        assert!(prompt.contains("-2.5307"));
        assert!(prompt.contains("-44.3068"));
    }

    #[test]
    fn test_near_distance_band_is_a_hard_constraint() {
        let mut filters = base_filters();
        filters.distance = Some(DistanceBand::Perto);

        let prompt = build_prompt(&filters, PromptMode::Strict);
        assert!(prompt.contains("NO MÁXIMO 3 QUILÔMETROS"));
        assert!(prompt.contains("distanceKm <= 3.0"));
        assert!(prompt.contains("REJEITE"));
    }

    #[test]
    fn test_medium_band_excludes_both_ends() {
        let mut filters = base_filters();
        filters.distance = Some(DistanceBand::Medio);

        let prompt = build_prompt(&filters, PromptMode::Strict);
        assert!(prompt.contains("entre 3km e 10km"));
        assert!(prompt.contains("3.0 <= distanceKm <= 10.0"));
    }

    #[test]
    fn test_optional_constraints_appear_only_when_set() {
        let prompt = build_prompt(&base_filters(), PromptMode::Strict);
        assert!(!prompt.contains("AMBIENTE:"));
        assert!(!prompt.contains("estacionamento próprio"));
        assert!(!prompt.contains("cadeirantes"));

        let mut filters = base_filters();
        filters.ambience = Some(Ambience::Intimo);
        filters.wants_parking = Some(true);
        filters.wants_accessible = Some(true);

        let prompt = build_prompt(&filters, PromptMode::Strict);
        assert!(prompt.contains("íntimo e reservado"));
        assert!(prompt.contains("DEVE ter estacionamento"));
        assert!(prompt.contains("acessível para cadeirantes"));
    }

    #[test]
    fn test_parking_false_is_not_a_requirement() {
        let mut filters = base_filters();
        filters.wants_parking = Some(false);
        let prompt = build_prompt(&filters, PromptMode::Strict);
        assert!(!prompt.contains("DEVE ter estacionamento"));
    }

    #[test]
    fn test_price_equality_check_uses_wire_symbol() {
        let mut filters = base_filters();
        filters.budget = Budget::High;
        let prompt = build_prompt(&filters, PromptMode::Strict);
        assert!(prompt.contains(r#"priceRange === "$$$"?"#));
    }

    #[test]
    fn test_output_contract_and_count_permission() {
        let prompt = build_prompt(&base_filters(), PromptMode::Strict);
        assert!(prompt.contains("\"recommendations\""));
        assert!(prompt.contains("\"romanticActivity\""));
        assert!(prompt.contains("\"temEstacionamento\""));
        assert!(prompt.contains("retorne menos lugares"));
        assert!(prompt.contains("NÃO invente"));
        assert!(prompt.contains("referências numéricas entre colchetes"));
    }

    #[test]
    fn test_soft_mode_drops_rejection_rules() {
        let mut filters = base_filters();
        filters.distance = Some(DistanceBand::Perto);

        let soft = build_prompt(&filters, PromptMode::Soft);
        assert!(!soft.contains("VALIDAÇÃO FINAL"));
        assert!(!soft.contains("REGRAS CRÍTICAS"));
        // Preferences and the output contract survive
        assert!(soft.contains("DISTÂNCIA PREFERIDA"));
        assert!(soft.contains("\"recommendations\""));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let filters = base_filters();
        assert_eq!(
            build_prompt(&filters, PromptMode::Strict),
            build_prompt(&filters, PromptMode::Strict)
        );
    }

    #[test]
    fn test_cheap_dining_gets_popular_venue_guidance() {
        let mut filters = base_filters();
        filters.budget = Budget::Low;
        let prompt = build_prompt(&filters, PromptMode::Strict);
        assert!(prompt.contains("PARA OPÇÃO BARATA"));
        assert!(prompt.contains("POPULAR/BARATO"));

        filters.budget = Budget::Mid;
        let prompt = build_prompt(&filters, PromptMode::Strict);
        assert!(prompt.contains("DIVERSIDADE GASTRONÔMICA"));
    }
}
