pub mod aux_naming;
