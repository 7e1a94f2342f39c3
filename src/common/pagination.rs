// src/common/pagination.rs

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// Paginação por página (base 0) e tamanho de página.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pagination {
    // Página, começando em 0
    pub page: Option<i64>,
    // Itens por página (padrão 10, máximo 100)
    pub limit: Option<i64>,
}

impl Pagination {
    pub fn limit(&self) -> i64 {
        match self.limit {
            Some(l) if l > 0 => l.min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        }
    }

    pub fn offset(&self) -> i64 {
        // Páginas absurdas saturam: a consulta só volta vazia
        self.page.unwrap_or(0).max(0).saturating_mul(self.limit())
    }
}

/// Transforma o termo de busca num padrão ILIKE, ignorando buscas vazias.
pub fn search_pattern(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let escaped = s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
            format!("%{}%", escaped)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let p = Pagination::default();
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn offset_is_page_times_limit() {
        let p = Pagination { page: Some(3), limit: Some(20) };
        assert_eq!(p.offset(), 60);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(Pagination { page: None, limit: Some(0) }.limit(), 10);
        assert_eq!(Pagination { page: None, limit: Some(5000) }.limit(), 100);
        assert_eq!(Pagination { page: Some(-2), limit: None }.offset(), 0);
        assert_eq!(Pagination { page: Some(i64::MAX / 2), limit: Some(100) }.offset(), i64::MAX);
        assert_eq!(Pagination { page: Some(i64::MAX), limit: None }.offset(), i64::MAX);
    }

    #[test]
    fn search_pattern_escapes_wildcards() {
        assert_eq!(search_pattern(Some("lap")), Some("%lap%".to_string()));
        assert_eq!(search_pattern(Some("50%")), Some("%50\\%%".to_string()));
        assert_eq!(search_pattern(Some("   ")), None);
        assert_eq!(search_pattern(None), None);
    }
}
