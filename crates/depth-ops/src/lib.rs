pub mod ops_tree;
