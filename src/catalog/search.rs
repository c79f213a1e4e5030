use super::records::CaseItem;

/// Case-insensitive search on title and id. A blank query returns everything.
pub fn search_cases<'a>(items: &'a [CaseItem], query: &str) -> Vec<&'a CaseItem> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|it| it.titulo.to_lowercase().contains(&q) || it.id.to_lowercase().contains(&q))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, titulo: &str) -> CaseItem {
        CaseItem {
            id: id.to_string(),
            titulo: titulo.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_search() {
        let items = vec![
            item("REC-01", "Reclamo de facturación"),
            item("BAJ-02", "Solicitud de baja"),
        ];
        assert_eq!(search_cases(&items, "").len(), 2);
        assert_eq!(search_cases(&items, "  FACTURA ")[0].id, "REC-01");
        assert_eq!(search_cases(&items, "baj-0")[0].id, "BAJ-02");
        assert!(search_cases(&items, "zzz").is_empty());
    }
}
