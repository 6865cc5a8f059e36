pub mod ledger;
pub mod net;
pub mod policy;
pub mod sim;
pub mod topo;
pub mod trace;

#[cfg(test)]
mod test;
