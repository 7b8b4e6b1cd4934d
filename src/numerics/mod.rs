pub mod mrp;
