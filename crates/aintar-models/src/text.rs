//! Label normalization for name-based matching.

/// Uppercase `label` and strip Portuguese diacritics.
///
/// `"Orçamentação"` becomes `"ORCAMENTACAO"`.
pub fn fold_label(label: &str) -> String {
    label
        .chars()
        .flat_map(char::to_uppercase)
        .map(|c| match c {
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'Ç' => 'C',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_label() {
        assert_eq!(fold_label("Orçamentação"), "ORCAMENTACAO");
        assert_eq!(fold_label("concluído"), "CONCLUIDO");
        assert_eq!(fold_label("Cobrança"), "COBRANCA");
        assert_eq!(fold_label("valor_m3"), "VALOR_M3");
    }
}
