//! System prompts and the canned queries each scenario sends.

pub const QUICKSTART_PROMPT: &str =
    "You are a helpful AI assistant with access to calculation and time tools.";

pub const QUICKSTART_QUERY: &str = "What is 25 * 48? Also, what time is it?";

pub const SHOWCASE_PROMPT: &str = "You are a helpful AI assistant with access to various tools. \
Use them to provide accurate and detailed responses. \
When a calculation has several steps, show each intermediate result.";

pub const AZURE_PROMPT: &str = "You are an AI assistant powered by Azure OpenAI. \
You have access to various tools to help users effectively. \
Always strive to be helpful, accurate, and efficient.";

pub const CHAT_PROMPT: &str = "You are a helpful assistant. \
Use the available tools when they help answer the question.";

pub const FILE_SYSTEM_PROMPT: &str = "You are a file operations specialist. You help users read,
write, search, and modify files. Focus on providing clear information about file
operations and always confirm when files have been modified.

Key Capabilities:
1. Read files with various options (full content, line ranges, search)
2. Create and write to files
3. Edit existing files with precision
4. Report file information and statistics

Always specify the full file path in your responses for clarity.
";

pub const FILES_QUERY: &str =
    "Can you check what operating system I'm using and the current directory?";

/// A titled query run as part of a scripted demonstration.
pub struct Example {
    pub name: &'static str,
    pub query: &'static str,
}

pub const SHOWCASE_EXAMPLES: [Example; 5] = [
    Example {
        name: "Simple Calculation",
        query: "What is 1234 * 5678?",
    },
    Example {
        name: "Multiple Tools Usage",
        query: "Please help me with these tasks:
1. What's the current time?
2. Calculate the compound interest on $10,000 at 5% annual rate for 3 years
3. What's the weather in San Francisco?",
    },
    Example {
        name: "Text Analysis with Custom Tool",
        query: "Analyze this text: 'The quick brown fox jumps over the lazy dog. 
The dog was really lazy but the fox was extremely quick.'
Give me the word statistics.",
    },
    Example {
        name: "Weather Comparison",
        query: "Compare the weather in London, New York and Tokyo. Which city is warmest?",
    },
    Example {
        name: "Complex Multi-Step Task",
        query: "I'm planning a trip. Can you:
1. Tell me the current time
2. Check the weather in Tokyo
3. Calculate how much $1000 USD is worth in Japanese Yen (use 150 JPY per USD)
4. Calculate the total travel expenses if:
   - Hotel: 15000 JPY per night for 5 nights
   - Food: 5000 JPY per day for 5 days
   - Transportation: 3000 JPY total",
    },
];

pub const AZURE_EXAMPLES: [Example; 5] = [
    Example {
        name: "Basic Interaction",
        query: "Hello! Can you tell me about yourself and what tools you have access to?",
    },
    Example {
        name: "Mathematical Calculation",
        query: "Calculate the factorial of 12 and express it in scientific notation.",
    },
    Example {
        name: "System Information",
        query: "Can you check what operating system I'm using and the current directory?",
    },
    Example {
        name: "File Operations",
        query: "Read the README.md file if it exists and summarize its contents.",
    },
    Example {
        name: "Complex Task",
        query: "Help me with these tasks:
1. Calculate the area of a circle with radius 7.5 cm
2. Convert the result to square inches (1 inch = 2.54 cm)
3. Tell me the current working directory
4. List the Rust files in the current directory",
    },
];

pub const PROVIDER_REMEDIATION: [&str; 7] = [
    "For OpenAI:",
    "  export OPENAI_API_KEY='your-api-key'",
    "",
    "For Azure OpenAI:",
    "  export AZURE_API_KEY='your-api-key'",
    "  export AZURE_API_BASE='https://your-resource.openai.azure.com'",
    "  export AZURE_API_VERSION='2024-02-15-preview'",
];

pub const AZURE_REMEDIATION: [&str; 4] = [
    "  export AZURE_API_KEY='your-api-key'",
    "  export AZURE_API_BASE='https://your-resource.openai.azure.com'",
    "  export AZURE_API_VERSION='2024-02-15-preview'  # optional",
    "  export AZURE_DEPLOYMENT_NAME='your-deployment'  # optional",
];

pub const BEDROCK_REMEDIATION: [&str; 4] = [
    "  export AWS_ACCESS_KEY_ID='your-access-key-id'",
    "  export AWS_SECRET_ACCESS_KEY='your-secret-access-key'",
    "  export AWS_REGION='us-east-2'  # optional",
    "  export BEDROCK_MODEL_ID='us.anthropic.claude-sonnet-4-5-20250929-v1:0'  # optional",
];

pub const AZURE_TROUBLESHOOTING: [&str; 4] = [
    "1. Verify your Azure OpenAI resource is deployed",
    "2. Check that your deployment name matches your Azure configuration",
    "3. Ensure your API key has proper permissions",
    "4. Confirm your API base URL is correct (should not include deployment name)",
];
