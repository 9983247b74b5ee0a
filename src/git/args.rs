//! Argument builders for each git operation.
//!
//! Every function here is pure: it validates its inputs and returns the
//! argument list that follows the `git` program name. Nothing is executed.
//!
//! Messages and templates are wrapped in single quotes inside the flag itself
//! (`--message='msg'`). Embedded single quotes are passed through unescaped.

use crate::error::{GitError, GitResult};

fn require(operation: &'static str, value: &str, reason: &'static str) -> GitResult<()> {
    if value.is_empty() {
        return Err(GitError::InvalidArguments { operation, reason });
    }
    Ok(())
}

fn quoted(flag: &str, value: &str) -> String {
    format!("{}='{}'", flag, value)
}

fn to_strings<S: AsRef<str>>(items: &[S]) -> impl Iterator<Item = String> + '_ {
    items.iter().map(|s| s.as_ref().to_string())
}

/// `git init [--template='<template>'] [<dir>]`
pub fn init(dir: &str, template: &str) -> Vec<String> {
    let mut args = vec!["init".to_string()];
    if !template.is_empty() {
        args.push(quoted("--template", template));
    }
    if !dir.is_empty() {
        args.push(dir.to_string());
    }
    args
}

/// `git clone <url> [<dir>]`
pub fn clone(url: &str, dir: &str) -> GitResult<Vec<String>> {
    require("clone", url, "no repository url specified")?;

    let mut args = vec!["clone".to_string(), url.to_string()];
    if !dir.is_empty() {
        args.push(dir.to_string());
    }
    Ok(args)
}

/// `git add .` when no files are given, otherwise `git add <files>...`
pub fn add<S: AsRef<str>>(files: &[S]) -> Vec<String> {
    let mut args = vec!["add".to_string()];
    if files.is_empty() {
        args.push(".".to_string());
    } else {
        args.extend(to_strings(files));
    }
    args
}

/// `git rm -r .` when recursive with no files, otherwise `git rm <files>...`
///
/// The recursive flag only matters when `files` is empty.
pub fn remove<S: AsRef<str>>(recursive: bool, files: &[S]) -> GitResult<Vec<String>> {
    if files.is_empty() && !recursive {
        return Err(GitError::InvalidArguments {
            operation: "remove",
            reason: "called without specifying files or recursive",
        });
    }

    let mut args = vec!["rm".to_string()];
    if files.is_empty() {
        args.push("-r".to_string());
        args.push(".".to_string());
    } else {
        args.extend(to_strings(files));
    }
    Ok(args)
}

/// `git commit --message='<msg>'`, or an explicit empty message
pub fn commit(message: &str) -> Vec<String> {
    let mut args = vec!["commit".to_string()];
    if message.is_empty() {
        args.push("--allow-empty-message".to_string());
        args.push("--message=''".to_string());
    } else {
        args.push(quoted("--message", message));
    }
    args
}

/// `git branch <name>`
pub fn branch(name: &str) -> GitResult<Vec<String>> {
    require("branch", name, "no branch name specified")?;
    Ok(vec!["branch".to_string(), name.to_string()])
}

/// `git branch -d <name>`
pub fn delete_branch(name: &str) -> GitResult<Vec<String>> {
    require("delete_branch", name, "no branch name specified")?;
    Ok(vec!["branch".to_string(), "-d".to_string(), name.to_string()])
}

/// `git checkout <branch>`
pub fn checkout(branch: &str) -> GitResult<Vec<String>> {
    require("checkout", branch, "no branch specified")?;
    Ok(vec!["checkout".to_string(), branch.to_string()])
}

/// `git tag -m='<msg>' <name>`, or `git tag -a <name>` without a message
pub fn tag(name: &str, message: &str) -> GitResult<Vec<String>> {
    require("tag", name, "no tag name specified")?;

    let mut args = vec!["tag".to_string()];
    if message.is_empty() {
        args.push("-a".to_string());
    } else {
        args.push(quoted("-m", message));
    }
    args.push(name.to_string());
    Ok(args)
}

/// `git tag -d <name>`
pub fn delete_tag(name: &str) -> GitResult<Vec<String>> {
    require("delete_tag", name, "no tag name specified")?;
    Ok(vec!["tag".to_string(), "-d".to_string(), name.to_string()])
}

/// `git merge -m='<msg>' [--no-ff] <branch>`
///
/// The message flag is always present, even for an empty message.
pub fn merge(branch: &str, message: &str, fast_forward: bool) -> GitResult<Vec<String>> {
    require("merge", branch, "called without specifying a branch")?;

    let mut args = vec!["merge".to_string(), quoted("-m", message)];
    if !fast_forward {
        args.push("--no-ff".to_string());
    }
    args.push(branch.to_string());
    Ok(args)
}

/// `git remote add <name> <location>`
pub fn remote_add(name: &str, location: &str) -> GitResult<Vec<String>> {
    require("remote_add", name, "no remote name specified")?;
    require("remote_add", location, "no remote location specified")?;
    Ok(vec![
        "remote".to_string(),
        "add".to_string(),
        name.to_string(),
        location.to_string(),
    ])
}

/// `git remote rm <name>`
pub fn remote_remove(name: &str) -> GitResult<Vec<String>> {
    require("remote_remove", name, "no remote name specified")?;
    Ok(vec!["remote".to_string(), "rm".to_string(), name.to_string()])
}

/// `git remote set-url <name> <location>`
pub fn remote_set_url(name: &str, location: &str) -> GitResult<Vec<String>> {
    require("remote_set_url", name, "no remote name specified")?;
    require("remote_set_url", location, "no remote location specified")?;
    Ok(vec![
        "remote".to_string(),
        "set-url".to_string(),
        name.to_string(),
        location.to_string(),
    ])
}

/// `git fetch <remote> --all` when no branches are given, otherwise
/// `git fetch <remote> <branches>...`
pub fn fetch<S: AsRef<str>>(remote: &str, branches: &[S]) -> GitResult<Vec<String>> {
    require("fetch", remote, "no remote specified")?;

    let mut args = vec!["fetch".to_string(), remote.to_string()];
    if branches.is_empty() {
        args.push("--all".to_string());
    } else {
        args.extend(to_strings(branches));
    }
    Ok(args)
}

/// `git pull <remote> [<branches>...]`
pub fn pull<S: AsRef<str>>(remote: &str, branches: &[S]) -> GitResult<Vec<String>> {
    require("pull", remote, "no remote specified")?;

    let mut args = vec!["pull".to_string(), remote.to_string()];
    args.extend(to_strings(branches));
    Ok(args)
}
