pub(crate) mod flow;
pub(crate) mod font;
pub(crate) mod layout;
pub(crate) mod parley_face;
pub(crate) mod segment;

#[cfg(test)]
#[path = "../../tests/unit/text/support.rs"]
pub(crate) mod test_support;
