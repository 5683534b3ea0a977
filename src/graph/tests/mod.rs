mod invariants;
mod maximal;
mod rb_graph;
