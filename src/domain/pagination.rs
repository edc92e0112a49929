use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One page of a listing, in the order the persistence layer returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub size: u32,
    #[schema(example = 1)]
    pub total: u64,
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(page: u32, size: u32, total: u64, data: Vec<T>) -> Self {
        Self {
            page,
            size,
            total,
            data,
        }
    }

    pub fn pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.size))
    }

    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            page: self.page,
            size: self.size,
            total: self.total,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}
