//! Static memory-hub reference injected at bootstrap.

/// Bootstrap file name registered with the host.
pub const TOOLS_BOOTSTRAP_NAME: &str = "memory-fabric-tools";

pub const TOOLS_MD: &str = r#"# Memory Fabric Tools

Available commands for managing memory:

```bash
# Search memories
memory-hub search "query"

# Write a memory
memory-hub write "content" --type note

# Assemble context for current task
memory-hub assemble "what I'm working on" --max-tokens 1200

# Summarize session
memory-hub summarize --type note
```

See `memory-hub --help` for full command list.
"#;
