use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    /// Restrict to one exam
    pub exam: Option<i32>,
    /// 1-based page; both page and pageSize are needed to paginate
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl DashboardQuery {
    pub fn pagination(&self) -> Option<(u64, u64)> {
        match (self.page, self.page_size) {
            (Some(page), Some(page_size)) => Some((page, page_size)),
            (Some(page), None) => Some((page, 50)),
            (None, Some(page_size)) => Some((1, page_size)),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_is_optional() {
        let all = DashboardQuery { exam: None, page: None, page_size: None };
        assert_eq!(all.pagination(), None);

        let second = DashboardQuery { exam: Some(1), page: Some(2), page_size: Some(20) };
        assert_eq!(second.pagination(), Some((2, 20)));

        let sized = DashboardQuery { exam: None, page: None, page_size: Some(10) };
        assert_eq!(sized.pagination(), Some((1, 10)));
    }
}
