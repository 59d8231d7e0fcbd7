pub mod product_limit;
