mod simulation;
mod topologies;
