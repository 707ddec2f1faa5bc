mod article;
mod status;

pub use article::Article;
pub use status::LoadStatus;
