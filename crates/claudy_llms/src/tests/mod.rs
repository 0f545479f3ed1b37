mod anthropic_stream;
