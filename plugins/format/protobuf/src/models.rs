//! Message types for `tests.proto` (package `models`), in the shape
//! `prost-build` emits them with `btree_map(["."])`.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Test {
    #[prost(message, repeated, tag = "1")]
    pub tests: ::prost::alloc::vec::Vec<test::TestInstance>,
}

/// Nested message and enum types in `Test`.
pub mod test {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct TestInstance {
        #[prost(int32, tag = "1")]
        pub id: i32,
        #[prost(float, tag = "2")]
        pub frac: f32,
        #[prost(string, tag = "3")]
        pub name: ::prost::alloc::string::String,
        #[prost(btree_map = "string, int32", tag = "4")]
        pub maps: ::prost::alloc::collections::BTreeMap<::prost::alloc::string::String, i32>,
    }
}
