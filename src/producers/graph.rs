// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Producer dependency resolution.
//!
//! Builds the "must run before" graph from each producer's declared required
//! inputs and computes a linear execution order. An edge I -> P exists only
//! when I is a configured producer; the reserved record key imposes no
//! ordering constraint. Any other unknown input name is a contract violation
//! raised here, before any event is processed.
//!
//! Ordering uses Kahn's algorithm. Among simultaneously-ready producers the
//! earliest-configured one wins, so the order is stable across runs with the
//! same configuration. On a cycle, a DFS with recursion-stack tracking
//! extracts the exact cycle path for the diagnostic.

use crate::config::consts::RECORD_KEY;
use crate::errors::ConfigError;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Compute the execution order for `(name, required_inputs)` pairs given in
/// configuration order.
///
/// The order is computed once at pipeline build and reused for every event.
pub fn resolve_execution_order(
    declared: &[(String, Vec<String>)],
) -> Result<Vec<String>, ConfigError> {
    let index_of: HashMap<&str, usize> = declared
        .iter()
        .enumerate()
        .map(|(i, (name, _))| (name.as_str(), i))
        .collect();

    // Adjacency by configuration index: dependency -> dependents.
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); declared.len()];
    let mut in_degree: Vec<usize> = vec![0; declared.len()];

    for (i, (name, inputs)) in declared.iter().enumerate() {
        for input in inputs {
            match index_of.get(input.as_str()) {
                Some(&dep) => {
                    dependents[dep].push(i);
                    in_degree[i] += 1;
                }
                None if input == RECORD_KEY => {}
                None => {
                    return Err(ConfigError::UnknownInput {
                        producer: name.clone(),
                        input: input.clone(),
                    });
                }
            }
        }
    }

    // Kahn's algorithm; the min-index heap makes tie-breaking follow
    // configuration order.
    let mut ready: BinaryHeap<Reverse<usize>> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, &deg)| deg == 0)
        .map(|(i, _)| Reverse(i))
        .collect();
    let mut order = Vec::with_capacity(declared.len());

    while let Some(Reverse(node)) = ready.pop() {
        order.push(declared[node].0.clone());
        for &dependent in &dependents[node] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                ready.push(Reverse(dependent));
            }
        }
    }

    if order.len() != declared.len() {
        let cycle = extract_cycle(declared, &dependents);
        return Err(ConfigError::CyclicDependency { cycle });
    }

    Ok(order)
}

/// Find one cycle path for the diagnostic. Only called when Kahn's sort
/// could not place every producer, so a cycle is guaranteed to exist.
fn extract_cycle(declared: &[(String, Vec<String>)], dependents: &[Vec<usize>]) -> Vec<String> {
    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for start in 0..declared.len() {
        if !visited.contains(&start) {
            if let Some(cycle) = dfs_cycle(
                start,
                declared,
                dependents,
                &mut visited,
                &mut rec_stack,
                &mut path,
            ) {
                return cycle;
            }
        }
    }

    // Unreachable given the caller's invariant; fall back to naming every
    // producer left unordered.
    declared.iter().map(|(name, _)| name.clone()).collect()
}

fn dfs_cycle(
    node: usize,
    declared: &[(String, Vec<String>)],
    dependents: &[Vec<usize>],
    visited: &mut HashSet<usize>,
    rec_stack: &mut HashSet<usize>,
    path: &mut Vec<usize>,
) -> Option<Vec<String>> {
    visited.insert(node);
    rec_stack.insert(node);
    path.push(node);

    for &neighbor in &dependents[node] {
        if !visited.contains(&neighbor) {
            if let Some(cycle) = dfs_cycle(neighbor, declared, dependents, visited, rec_stack, path)
            {
                return Some(cycle);
            }
        } else if rec_stack.contains(&neighbor) {
            // Found a back edge - extract the cycle path and close it.
            let cycle_start = path.iter().position(|&x| x == neighbor).unwrap_or(0);
            let mut cycle: Vec<String> = path[cycle_start..]
                .iter()
                .map(|&i| declared[i].0.clone())
                .collect();
            cycle.push(declared[neighbor].0.clone());
            return Some(cycle);
        }
    }

    rec_stack.remove(&node);
    path.pop();
    None
}
