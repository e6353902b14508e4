pub mod page_header;
pub mod pagination_controls;
pub mod search_input;
pub mod segmented;
pub mod stat_card;

pub use page_header::PageHeader;
pub use pagination_controls::PaginationControls;
pub use search_input::MovieSearch;
pub use segmented::Segmented;
pub use stat_card::{CardFormat, StatCard};
