pub mod todo_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use todo_service::TodoService;
